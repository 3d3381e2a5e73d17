//! Bubble view-model.
//!
//! Bubbles carry only light markup: `**bold**` runs, line breaks, and list
//! markers. This module parses that into a structure the renderer (or any
//! other front end) can walk, which is what replaces direct DOM mutation.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleContent {
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Paragraph(Vec<InlineSpan>),
    Bullets(Vec<Vec<InlineSpan>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub bold: bool,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

fn bullet_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^\s*(?:[-*•]|\d+\.)\s+").expect("hardcoded pattern"))
}

/// Parse one bubble into blocks. Consecutive list-marker lines fold into a
/// single [`BlockNode::Bullets`]; every other non-empty line is a paragraph.
pub fn parse_bubble(text: &str) -> BubbleContent {
    let mut blocks = Vec::new();
    let mut bullets: Vec<Vec<InlineSpan>> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !bullets.is_empty() {
                blocks.push(BlockNode::Bullets(std::mem::take(&mut bullets)));
            }
            continue;
        }

        if let Some(found) = bullet_marker().find(trimmed) {
            bullets.push(parse_inline(&trimmed[found.end()..]));
        } else {
            if !bullets.is_empty() {
                blocks.push(BlockNode::Bullets(std::mem::take(&mut bullets)));
            }
            blocks.push(BlockNode::Paragraph(parse_inline(trimmed)));
        }
    }

    if !bullets.is_empty() {
        blocks.push(BlockNode::Bullets(bullets));
    }

    BubbleContent { blocks }
}

/// Split a line on `**` pairs. An unmatched trailing `**` stays literal.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };

        if start > 0 {
            spans.push(InlineSpan::plain(&rest[..start]));
        }
        if end > 0 {
            spans.push(InlineSpan::bold(&after[..end]));
        }
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        spans.push(InlineSpan::plain(rest));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_become_paragraphs() {
        let content = parse_bubble("We have three in stock.");
        assert_eq!(
            content.blocks,
            vec![BlockNode::Paragraph(vec![InlineSpan::plain(
                "We have three in stock."
            )])]
        );
    }

    #[test]
    fn bold_runs_split_into_spans() {
        let spans = parse_inline("From **AED 185,000** on the road.");
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("From "),
                InlineSpan::bold("AED 185,000"),
                InlineSpan::plain(" on the road."),
            ]
        );
    }

    #[test]
    fn unmatched_bold_markers_stay_literal() {
        let spans = parse_inline("a ** b");
        assert_eq!(spans, vec![InlineSpan::plain("a ** b")]);
    }

    #[test]
    fn consecutive_bullets_fold_into_one_block() {
        let content = parse_bubble("• EQA 250\n• EQB 350\nBoth in stock.");
        assert_eq!(content.blocks.len(), 2);
        match &content.blocks[0] {
            BlockNode::Bullets(items) => assert_eq!(items.len(), 2),
            other => panic!("expected bullets, got {other:?}"),
        }
        assert!(matches!(content.blocks[1], BlockNode::Paragraph(_)));
    }

    #[test]
    fn bullet_items_keep_their_markup() {
        let content = parse_bubble("- **423 km** range");
        match &content.blocks[0] {
            BlockNode::Bullets(items) => {
                assert_eq!(
                    items[0],
                    vec![InlineSpan::bold("423 km"), InlineSpan::plain(" range")]
                );
            }
            other => panic!("expected bullets, got {other:?}"),
        }
    }
}
