use regex::Regex;
use std::sync::OnceLock;

/// Topic inferred from the user's query, used to key the follow-up pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Price,
    Type,
    Features,
    General,
}

const PRICE_QUESTIONS: &[&str] = &[
    "Do you have a monthly budget in mind? 💰",
    "Would you like me to break down the financing options?",
    "Want me to check for current offers on these?",
];

const TYPE_QUESTIONS: &[&str] = &[
    "Are you leaning more towards an SUV or a sedan?",
    "Would you like electric options only, or hybrids too?",
    "Any preference on seating capacity?",
];

const FEATURES_QUESTIONS: &[&str] = &[
    "Which matters most to you: range, tech, or comfort?",
    "Want the full spec sheet for any of these?",
    "Should I compare two of these side by side?",
];

const GENERAL_QUESTIONS: &[&str] = &[
    "Is there anything else you'd like to know?",
    "Want me to pull up more details from our inventory?",
    "Shall I check availability at your nearest showroom?",
];

struct TopicPatterns {
    price: Regex,
    kind: Regex,
    features: Regex,
}

fn topic_patterns() -> &'static TopicPatterns {
    static PATTERNS: OnceLock<TopicPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TopicPatterns {
        price: Regex::new(
            r"(?i)\b(?:price|cost|costs|budget|aed|afford|cheap|expensive|payment|instal?lment|financ\w*|offer|deal)\b",
        )
        .expect("hardcoded pattern"),
        kind: Regex::new(
            r"(?i)\b(?:suv|sedan|hatchback|coupe|crossover|van|electric|ev|hybrid|petrol|diesel|model|type)\b",
        )
        .expect("hardcoded pattern"),
        features: Regex::new(
            r"(?i)\b(?:feature|spec|specs|range|battery|engine|seats?|boot|safety|tech|warranty|colou?r)\b",
        )
        .expect("hardcoded pattern"),
    })
}

/// Price beats type beats features: the more concrete the buying signal,
/// the more useful the matching follow-up.
pub fn detect_topic(query: &str) -> Topic {
    let patterns = topic_patterns();
    if patterns.price.is_match(query) {
        Topic::Price
    } else if patterns.kind.is_match(query) {
        Topic::Type
    } else if patterns.features.is_match(query) {
        Topic::Features
    } else {
        Topic::General
    }
}

/// The follow-up bubble for a query: one question from the topic's fixed
/// pool, picked deterministically from the query text.
pub fn question_for(query: &str) -> String {
    let pool = questions(detect_topic(query));
    pool[super::stable_index(query, pool.len())].to_string()
}

pub(crate) fn questions(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Price => PRICE_QUESTIONS,
        Topic::Type => TYPE_QUESTIONS,
        Topic::Features => FEATURES_QUESTIONS,
        Topic::General => GENERAL_QUESTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_key_off_query_keywords() {
        assert_eq!(detect_topic("what does the EQS cost?"), Topic::Price);
        assert_eq!(detect_topic("show me your SUVs"), Topic::Type);
        assert_eq!(detect_topic("what's the battery range?"), Topic::Features);
        assert_eq!(detect_topic("tell me about the showroom"), Topic::General);
    }

    #[test]
    fn price_wins_over_other_topics() {
        assert_eq!(
            detect_topic("price of your electric SUVs with the best range"),
            Topic::Price
        );
    }

    #[test]
    fn questions_come_from_the_topic_pool() {
        let query = "how much is the EQB?";
        let question = question_for(query);
        assert!(questions(Topic::Price).contains(&question.as_str()));
    }

    #[test]
    fn picks_are_stable_per_query() {
        let query = "any hybrids in stock?";
        assert_eq!(question_for(query), question_for(query));
    }
}
