//! Interactive chat session: transcript state, the terminal event loop, and
//! the fetch/upload tasks that feed it over a channel.

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::commands::{self, Command, ParsedInput};
use crate::core::backend::Backend;
use crate::core::config::Config;
use crate::core::constants::{TYPING_DELAY_MAX_MS, TYPING_DELAY_MIN_MS, TYPING_MS_PER_CHAR};
use crate::core::message::Message;
use crate::core::upload::{UploadRecord, UploadStatus};
use crate::pipeline::{self, EMPTY_REPLY_FALLBACK};
use crate::ui::renderer::{build_display_lines, build_upload_lines};
use crate::utils::logging::LoggingState;

const WELCOME_MESSAGE: &str = "I am GLOW and I'm here to support you with real-time \
inventory insights, document analysis (PDF, Excel, CSV), and live data retrieval from \
our CRM and backend systems. Please enter your query, and I'll handle the rest.";

const EXAMPLE_QUESTIONS: &str = "Questions you can ask:\n\
• What EV models are available that compete with an Etron?\n\
• Summarize the Q4 sales report.\n\
• Show me customer history for ID 12345.";

/// Events sent to the UI loop by fetch and upload tasks. Bubbles for one
/// response arrive pre-paced and in produced order; the loop never reorders.
#[derive(Debug)]
pub enum UiEvent {
    Bubble(String),
    Sources(Vec<String>),
    ChatError(String),
    ResponseDone,
    UploadDone {
        index: usize,
        status: UploadStatus,
        notice: String,
    },
}

pub struct ChatApp {
    pub messages: VecDeque<Message>,
    pub uploads: Vec<UploadRecord>,
    pub input: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Responses still in flight. There is no cancellation: sending again
    /// while this is non-zero just queues more bubbles behind the first.
    pub pending_responses: usize,
    pub logging: LoggingState,
    backend: Arc<dyn Backend>,
    typing_enabled: bool,
    typing_ms_per_char: u64,
    pulse_start: Instant,
}

impl ChatApp {
    pub fn new(config: &Config, backend: Arc<dyn Backend>) -> Self {
        let logging = LoggingState::new(config.log_file.clone());
        let mut app = ChatApp {
            messages: VecDeque::new(),
            uploads: Vec::new(),
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            pending_responses: 0,
            logging,
            backend,
            typing_enabled: config.typing_enabled(),
            typing_ms_per_char: config.typing_ms_per_char.unwrap_or(TYPING_MS_PER_CHAR),
            pulse_start: Instant::now(),
        };
        app.messages.push_back(Message::bot(WELCOME_MESSAGE));
        app.messages.push_back(Message::bot(EXAMPLE_QUESTIONS));
        app
    }

    pub fn push_user_message(&mut self, content: &str) {
        if let Err(e) = self.logging.log_message(&format!("You: {content}")) {
            self.push_app_error(format!("Failed to log message: {e}"));
        }
        self.messages.push_back(Message::user(content));
    }

    pub fn push_app_info(&mut self, content: impl Into<String>) {
        self.messages.push_back(Message::app_info(content));
    }

    pub fn push_app_error(&mut self, content: impl Into<String>) {
        self.messages.push_back(Message::app_error(content));
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Bubble(text) => {
                if let Err(e) = self.logging.log_message(&text) {
                    self.push_app_error(format!("Failed to log message: {e}"));
                }
                self.messages.push_back(Message::bot(text));
            }
            UiEvent::Sources(sources) => {
                self.push_app_info(format!("Sources: {}", sources.join(", ")));
            }
            UiEvent::ChatError(message) => {
                self.push_app_error(format!(
                    "Sorry, I encountered an error: {message}. Please try again."
                ));
            }
            UiEvent::ResponseDone => {
                self.pending_responses = self.pending_responses.saturating_sub(1);
            }
            UiEvent::UploadDone {
                index,
                status,
                notice,
            } => {
                if let Some(record) = self.uploads.get_mut(index) {
                    record.complete(status);
                }
                self.messages.push_back(Message::bot(notice));
            }
        }
        if self.auto_scroll {
            // Clamped to the real maximum at draw time.
            self.scroll_offset = u16::MAX;
        }
    }

    /// Animated indicator line while any response is pending.
    pub fn typing_indicator(&self) -> Option<String> {
        if self.pending_responses == 0 {
            return None;
        }
        let dots = (self.pulse_start.elapsed().as_millis() / 400) % 3 + 1;
        Some(format!("GLOW is typing{}", ".".repeat(dots as usize)))
    }

    pub fn send_query(&mut self, query: String, tx: mpsc::UnboundedSender<UiEvent>) {
        self.push_user_message(&query);
        self.pending_responses += 1;

        let backend = Arc::clone(&self.backend);
        let typing_enabled = self.typing_enabled;
        let ms_per_char = self.typing_ms_per_char;
        tokio::spawn(async move {
            match backend.send_query(&query).await {
                Ok(reply) => {
                    let text = reply.text().unwrap_or(EMPTY_REPLY_FALLBACK).to_string();
                    for bubble in pipeline::segment_reply(&query, &text) {
                        if typing_enabled {
                            tokio::time::sleep(typing_delay(&bubble, ms_per_char)).await;
                        }
                        if tx.send(UiEvent::Bubble(bubble)).is_err() {
                            return;
                        }
                    }
                    if !reply.sources.is_empty() {
                        let _ = tx.send(UiEvent::Sources(reply.sources));
                    }
                    let _ = tx.send(UiEvent::ResponseDone);
                }
                Err(err) => {
                    let _ = tx.send(UiEvent::ChatError(err.to_string()));
                    let _ = tx.send(UiEvent::ResponseDone);
                }
            }
        });
    }

    /// Start one independent task per file; a failed read or POST settles
    /// only that file's record.
    pub fn start_uploads(&mut self, paths: Vec<PathBuf>, tx: mpsc::UnboundedSender<UiEvent>) {
        for path in paths {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let index = self.uploads.len();
            self.uploads.push(UploadRecord::new(file_name.clone()));

            let backend = Arc::clone(&self.backend);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = match tokio::fs::read(&path).await {
                    Ok(bytes) => backend.upload(&file_name, bytes).await.map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };

                let event = match outcome {
                    Ok(response) => {
                        let stored_name =
                            response.file_name.unwrap_or_else(|| file_name.clone());
                        let detail = response.message.unwrap_or_default();
                        UiEvent::UploadDone {
                            index,
                            status: UploadStatus::Processed,
                            notice: format!(
                                "Document \"{stored_name}\" has been uploaded. {detail}"
                            )
                            .trim_end()
                            .to_string(),
                        }
                    }
                    Err(message) => UiEvent::UploadDone {
                        index,
                        status: UploadStatus::Error,
                        notice: format!("Failed to upload \"{file_name}\": {message}"),
                    },
                };
                let _ = tx.send(event);
            });
        }
    }

    fn run_command(&mut self, command: Command, tx: &mpsc::UnboundedSender<UiEvent>) -> bool {
        match command {
            Command::Help => self.push_app_info(commands::help_text()),
            Command::Quit => return false,
            Command::Log(None) => match self.logging.toggle_logging() {
                Ok(message) => self.push_app_info(message),
                Err(e) => self.push_app_error(format!("Log error: {e}")),
            },
            Command::Log(Some(file)) => match self.logging.set_log_file(file) {
                Ok(message) => self.push_app_info(message),
                Err(e) => self.push_app_error(format!("Logfile error: {e}")),
            },
            Command::Upload(paths) => {
                if paths.is_empty() {
                    self.push_app_info("Usage: /upload <path> [path...]");
                } else {
                    self.start_uploads(paths, tx.clone());
                }
            }
        }
        true
    }

    fn max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines =
            build_display_lines(&self.messages, self.typing_indicator().as_deref()).len() as u16;
        total_lines.saturating_sub(available_height)
    }
}

pub fn typing_delay(bubble: &str, ms_per_char: u64) -> Duration {
    let ms = (bubble.chars().count() as u64 * ms_per_char)
        .clamp(TYPING_DELAY_MIN_MS, TYPING_DELAY_MAX_MS);
    Duration::from_millis(ms)
}

fn ui(f: &mut Frame, app: &ChatApp) {
    let uploads_height = if app.uploads.is_empty() {
        0
    } else {
        app.uploads.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(uploads_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    let lines = build_display_lines(&app.messages, app.typing_indicator().as_deref());

    let available_height = chunks[0].height.saturating_sub(1);
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let title = format!(
        "GLOW v{} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.logging.get_status_string()
    );

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));
    f.render_widget(messages_paragraph, chunks[0]);

    if uploads_height > 0 {
        let uploads_paragraph = Paragraph::new(build_upload_lines(&app.uploads))
            .block(Block::default().borders(Borders::ALL).title("Documents"));
        f.render_widget(uploads_paragraph, chunks[1]);
    }

    let input_title = "Type your message (Enter to send, /help for help, Ctrl+C to quit)";
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: true });
    f.render_widget(input, chunks[2]);

    f.set_cursor_position((chunks[2].x + app.input.chars().count() as u16 + 1, chunks[2].y + 1));
}

pub async fn run_chat(config: &Config, backend: Arc<dyn Backend>) -> Result<(), Box<dyn Error>> {
    let mut app = ChatApp::new(config, backend);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();

    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        if app.input.trim().is_empty() {
                            continue;
                        }
                        let input_text = std::mem::take(&mut app.input);
                        match commands::parse_input(&input_text) {
                            ParsedInput::Message(text) => {
                                app.send_query(text.trim().to_string(), tx.clone());
                            }
                            ParsedInput::Command(command) => {
                                if !app.run_command(command, &tx) {
                                    break Ok(());
                                }
                            }
                        }
                        app.auto_scroll = true;
                        app.scroll_offset = u16::MAX;
                    }
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        let available_height = terminal
                            .size()
                            .map(|size| size.height)
                            .unwrap_or_default()
                            .saturating_sub(4);
                        let max_scroll = app.max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(1).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(3);
                    }
                    MouseEventKind::ScrollDown => {
                        let available_height = terminal
                            .size()
                            .map(|size| size.height)
                            .unwrap_or_default()
                            .saturating_sub(4);
                        let max_scroll = app.max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(3).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Drain everything the tasks produced since the last frame.
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
