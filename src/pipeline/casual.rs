use regex::Regex;
use std::sync::OnceLock;

/// Inputs over this length are never treated as small talk; a real question
/// with a "thanks" tacked on still deserves a real answer.
const CASUAL_INPUT_MAX_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasualKind {
    Greeting,
    Thanks,
    Smalltalk,
    Farewell,
}

const GREETING_REPLIES: &[&str] = &[
    "Hello! 👋 How can I help you find the right car today?",
    "Hey there! Looking for something specific in our lineup?",
    "Hi! Ask me anything about our current inventory.",
];

const THANKS_REPLIES: &[&str] = &[
    "You're welcome! Anything else I can help with? 😊",
    "Happy to help! Let me know if you need anything else.",
    "Anytime! I'm here if more questions come up.",
];

const SMALLTALK_REPLIES: &[&str] = &[
    "I'm doing great, thanks for asking! What can I look up for you?",
    "All good on my end! How can I help you today?",
];

const FAREWELL_REPLIES: &[&str] = &[
    "Goodbye! Come back any time. 👋",
    "See you soon! Happy driving.",
];

struct Patterns {
    greeting: Regex,
    thanks: Regex,
    smalltalk: Regex,
    farewell: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        greeting: Regex::new(
            r"(?i)^\s*(?:hi|hiya|hello|hey|heya|greetings|salam|good\s+(?:morning|afternoon|evening))[\s!.,]*$",
        )
        .expect("hardcoded pattern"),
        thanks: Regex::new(r"(?i)\b(?:thanks|thank\s+you|thx|shukran|appreciate\s+it)\b")
            .expect("hardcoded pattern"),
        smalltalk: Regex::new(
            r"(?i)\b(?:how\s+are\s+you|how's\s+it\s+going|what's\s+up|wassup)\b",
        )
        .expect("hardcoded pattern"),
        farewell: Regex::new(r"(?i)^\s*(?:bye|goodbye|see\s+(?:you|ya)|good\s+night)[\s!.,]*$")
            .expect("hardcoded pattern"),
    })
}

/// Classify a user input as small talk, if it is nothing but small talk.
pub fn detect(input: &str) -> Option<CasualKind> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().count() > CASUAL_INPUT_MAX_CHARS {
        return None;
    }

    let patterns = patterns();
    if patterns.greeting.is_match(trimmed) {
        Some(CasualKind::Greeting)
    } else if patterns.farewell.is_match(trimmed) {
        Some(CasualKind::Farewell)
    } else if patterns.thanks.is_match(trimmed) {
        Some(CasualKind::Thanks)
    } else if patterns.smalltalk.is_match(trimmed) {
        Some(CasualKind::Smalltalk)
    } else {
        None
    }
}

/// One reply from the fixed pool for this kind, picked deterministically
/// from the input text.
pub fn canned_reply(kind: CasualKind, input: &str) -> String {
    let pool = replies(kind);
    pool[super::stable_index(input, pool.len())].to_string()
}

pub(crate) fn replies(kind: CasualKind) -> &'static [&'static str] {
    match kind {
        CasualKind::Greeting => GREETING_REPLIES,
        CasualKind::Thanks => THANKS_REPLIES,
        CasualKind::Smalltalk => SMALLTALK_REPLIES,
        CasualKind::Farewell => FAREWELL_REPLIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_are_detected() {
        for input in ["hi", "Hi!", "hello", "HEY", "good morning", "  hiya  "] {
            assert_eq!(detect(input), Some(CasualKind::Greeting), "input: {input}");
        }
    }

    #[test]
    fn thanks_and_farewells_are_detected() {
        assert_eq!(detect("thanks"), Some(CasualKind::Thanks));
        assert_eq!(detect("thank you!"), Some(CasualKind::Thanks));
        assert_eq!(detect("bye"), Some(CasualKind::Farewell));
        assert_eq!(detect("see you"), Some(CasualKind::Farewell));
    }

    #[test]
    fn smalltalk_is_detected() {
        assert_eq!(detect("how are you?"), Some(CasualKind::Smalltalk));
        assert_eq!(detect("what's up"), Some(CasualKind::Smalltalk));
    }

    #[test]
    fn real_questions_are_not_casual() {
        assert_eq!(detect("what EV models compete with the Etron?"), None);
        assert_eq!(detect("thanks, what's the warranty on the GLC?"), None);
        assert_eq!(detect("hello, do you have the EQS in stock?"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn canned_replies_come_from_the_pool_and_are_stable() {
        let reply = canned_reply(CasualKind::Greeting, "hi");
        assert!(replies(CasualKind::Greeting).contains(&reply.as_str()));
        assert_eq!(reply, canned_reply(CasualKind::Greeting, "hi"));
    }
}
