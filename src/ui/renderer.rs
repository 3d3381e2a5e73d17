use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::collections::VecDeque;

use crate::core::message::{Message, TranscriptRole};
use crate::core::upload::{UploadRecord, UploadStatus};
use crate::ui::markup::{parse_bubble, BlockNode, InlineSpan};

/// Build the transcript as styled lines, newest at the bottom. The chat loop
/// owns scrolling; this only lays content out in produced order.
pub fn build_display_lines(
    messages: &VecDeque<Message>,
    typing_indicator: Option<&str>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for msg in messages {
        match msg.role {
            TranscriptRole::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "You: ",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(msg.content.clone(), Style::default().fg(Color::Cyan)),
                    stamp_span(msg),
                ]));
                lines.push(Line::from(""));
            }
            TranscriptRole::Bot => {
                push_bubble_lines(&mut lines, msg);
                lines.push(Line::from(""));
            }
            TranscriptRole::AppInfo => {
                lines.push(Line::from(Span::styled(
                    msg.content.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(""));
            }
            TranscriptRole::AppError => {
                lines.push(Line::from(Span::styled(
                    msg.content.clone(),
                    Style::default().fg(Color::Red),
                )));
                lines.push(Line::from(""));
            }
        }
    }

    if let Some(indicator) = typing_indicator {
        lines.push(Line::from(Span::styled(
            indicator.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn push_bubble_lines(lines: &mut Vec<Line<'static>>, msg: &Message) {
    let content = parse_bubble(&msg.content);
    let mut first = true;

    for block in &content.blocks {
        match block {
            BlockNode::Paragraph(spans) => {
                let mut line_spans = styled_spans(spans);
                if first {
                    line_spans.push(stamp_span(msg));
                    first = false;
                }
                lines.push(Line::from(line_spans));
            }
            BlockNode::Bullets(items) => {
                for item in items {
                    let mut line_spans = vec![Span::styled(
                        "• ",
                        Style::default().fg(Color::White),
                    )];
                    line_spans.extend(styled_spans(item));
                    if first {
                        line_spans.push(stamp_span(msg));
                        first = false;
                    }
                    lines.push(Line::from(line_spans));
                }
            }
        }
    }

    // A bubble that parsed to nothing still takes a row, keeping order visible.
    if first {
        lines.push(Line::from(vec![Span::from(""), stamp_span(msg)]));
    }
}

fn styled_spans(spans: &[InlineSpan]) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| {
            let style = if span.bold {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(span.text.clone(), style)
        })
        .collect()
}

fn stamp_span(msg: &Message) -> Span<'static> {
    Span::styled(
        format!("  {}", msg.clock()),
        Style::default().fg(Color::DarkGray),
    )
}

/// The documents panel: one row per upload record, status colored the way
/// the widget colored them (busy blue, processed green, failed red).
pub fn build_upload_lines(uploads: &[UploadRecord]) -> Vec<Line<'static>> {
    uploads
        .iter()
        .map(|record| {
            let status_color = match record.status {
                UploadStatus::Uploading => Color::Blue,
                UploadStatus::Processed => Color::Green,
                UploadStatus::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(record.display_name(), Style::default().fg(Color::Gray)),
                Span::from("  "),
                Span::styled(record.status.label(), Style::default().fg(status_color)),
            ])
        })
        .collect()
}
