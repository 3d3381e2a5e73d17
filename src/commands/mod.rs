//! Slash-command parsing for the chat input line.
//!
//! Anything that does not start with `/` is a chat message; unknown
//! commands fall through as messages too, matching how the input box
//! behaved in the widget (nothing typed is ever swallowed silently).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Message(String),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// `/log` toggles, `/log <file>` enables logging to that file.
    Log(Option<String>),
    /// `/upload <path> [path...]`
    Upload(Vec<PathBuf>),
}

pub fn parse_input(input: &str) -> ParsedInput {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return ParsedInput::Message(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return ParsedInput::Message(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match command_name {
        "help" => ParsedInput::Command(Command::Help),
        "quit" | "exit" => ParsedInput::Command(Command::Quit),
        "log" => {
            let file = if args.is_empty() {
                None
            } else {
                Some(args.to_string())
            };
            ParsedInput::Command(Command::Log(file))
        }
        "upload" => {
            let paths = args
                .split_whitespace()
                .map(PathBuf::from)
                .collect::<Vec<_>>();
            ParsedInput::Command(Command::Upload(paths))
        }
        _ => ParsedInput::Message(input.to_string()),
    }
}

pub fn help_text() -> String {
    [
        "Commands:",
        "  /upload <path> [path...]   Upload documents to the assistant",
        "  /log <file>                Log the transcript to a file",
        "  /log                       Pause or resume transcript logging",
        "  /help                      Show this help",
        "  /quit                      Leave the chat",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse_input("any EVs in stock?"),
            ParsedInput::Message("any EVs in stock?".into())
        );
    }

    #[test]
    fn known_commands_parse() {
        assert_eq!(parse_input("/help"), ParsedInput::Command(Command::Help));
        assert_eq!(parse_input("/quit"), ParsedInput::Command(Command::Quit));
        assert_eq!(parse_input("/log"), ParsedInput::Command(Command::Log(None)));
        assert_eq!(
            parse_input("/log chat.txt"),
            ParsedInput::Command(Command::Log(Some("chat.txt".into())))
        );
    }

    #[test]
    fn upload_collects_every_path() {
        assert_eq!(
            parse_input("/upload a.pdf reports/q4.xlsx"),
            ParsedInput::Command(Command::Upload(vec![
                PathBuf::from("a.pdf"),
                PathBuf::from("reports/q4.xlsx"),
            ]))
        );
        assert_eq!(
            parse_input("/upload"),
            ParsedInput::Command(Command::Upload(vec![]))
        );
    }

    #[test]
    fn unknown_commands_fall_through_as_messages() {
        assert_eq!(
            parse_input("/definitely-not-a-command"),
            ParsedInput::Message("/definitely-not-a-command".into())
        );
        assert_eq!(parse_input("/"), ParsedInput::Message("/".into()));
    }
}
