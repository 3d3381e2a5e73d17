use regex::Regex;
use std::sync::OnceLock;

const CALL_TO_ACTION: &str = "Let me know if you'd like the full details!";

/// Keyword decorations, first match per bubble. Order fixes which emoji wins
/// when a keyword is a substring of another ("ev" vs "seven" is handled by
/// word boundaries, "electric" before "ev" keeps the pair stable).
const KEYWORD_EMOJI: &[(&str, &str)] = &[
    (r"(?i)\belectric\b|\bEVs?\b", "⚡"),
    (r"(?i)\bhybrids?\b", "🔋"),
    (r"(?i)\bSUVs?\b", "🚙"),
    (r"(?i)\bsedans?\b", "🚗"),
    (r"(?i)\bprices?\b|\boffers?\b|\bdeals?\b", "💰"),
    (r"(?i)\bwarranty\b", "🛡️"),
    (r"(?i)\bavailable\b|\bin stock\b", "✅"),
    (r"(?i)\bdelivery\b", "🚚"),
    (r"(?i)\bshowrooms?\b", "🏬"),
];

struct SpecPatterns {
    currency: Regex,
    units: Regex,
    keywords: Vec<(Regex, &'static str)>,
}

fn spec_patterns() -> &'static SpecPatterns {
    static PATTERNS: OnceLock<SpecPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SpecPatterns {
        currency: Regex::new(
            r"(?i)\b(?:AED|USD|EUR)\s?\d{1,3}(?:,\d{3})*(?:\.\d+)?\b|\$\s?\d[\d,]*(?:\.\d+)?",
        )
        .expect("hardcoded pattern"),
        units: Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s?(?:km|kwh|kw|hp|bhp|seats?|litres?|liters?)\b")
            .expect("hardcoded pattern"),
        keywords: KEYWORD_EMOJI
            .iter()
            .map(|(pattern, emoji)| (Regex::new(pattern).expect("hardcoded pattern"), *emoji))
            .collect(),
    })
}

/// Full cosmetic pass over one bubble. Not idempotent: running it twice
/// double-bolds, so the pipeline applies it exactly once per bubble.
pub fn polish(text: &str) -> String {
    decorate_keywords(&bold_specs(text))
}

/// Wrap currency amounts and number+unit pairs in `**...**`.
pub fn bold_specs(text: &str) -> String {
    let patterns = spec_patterns();
    let bolded = patterns.currency.replace_all(text, "**${0}**");
    patterns.units.replace_all(&bolded, "**${0}**").into_owned()
}

/// Append the matching emoji after the first occurrence of each keyword.
pub fn decorate_keywords(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, emoji) in &spec_patterns().keywords {
        if out.contains(emoji) {
            continue;
        }
        if let Some(found) = pattern.find(&out) {
            out.insert_str(found.end(), &format!(" {emoji}"));
        }
    }
    out
}

/// Append the call-to-action line when the bubble has no question of its own
/// and no closing exclamation.
pub fn ensure_call_to_action(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.contains('?') || trimmed.ends_with('!') {
        return text.to_string();
    }
    format!("{trimmed}\n\n{CALL_TO_ACTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_amounts_are_bolded() {
        assert_eq!(
            bold_specs("The EQB starts at AED 185,000 on the road."),
            "The EQB starts at **AED 185,000** on the road."
        );
        assert_eq!(bold_specs("yours for $42,500.50"), "yours for **$42,500.50**");
    }

    #[test]
    fn unit_figures_are_bolded() {
        assert_eq!(
            bold_specs("Range of 423 km with a 66.5 kWh battery."),
            "Range of **423 km** with a **66.5 kWh** battery."
        );
        assert_eq!(bold_specs("7 seats as standard"), "**7 seats** as standard");
    }

    #[test]
    fn plain_numbers_stay_plain() {
        assert_eq!(bold_specs("We have 3 in the showroom."), "We have 3 in the showroom.");
    }

    #[test]
    fn keywords_get_one_emoji_each() {
        assert_eq!(
            decorate_keywords("This electric SUV is available now."),
            "This electric ⚡ SUV 🚙 is available ✅ now."
        );
    }

    #[test]
    fn only_the_first_keyword_occurrence_is_decorated() {
        let decorated = decorate_keywords("electric today, electric tomorrow");
        assert_eq!(decorated.matches('⚡').count(), 1);
    }

    #[test]
    fn call_to_action_fills_the_gap() {
        let flat = "The GLC comes in five colours.";
        let with_cta = ensure_call_to_action(flat);
        assert!(with_cta.ends_with("Let me know if you'd like the full details!"));

        assert_eq!(ensure_call_to_action("Want a test drive?"), "Want a test drive?");
        assert_eq!(ensure_call_to_action("Book today!"), "Book today!");
    }

    #[test]
    fn polish_is_knowingly_not_idempotent() {
        let once = polish("From AED 90,000.");
        let twice = polish(&once);
        assert!(once.contains("**AED 90,000**"));
        assert!(twice.contains("****AED 90,000****"));
    }
}
