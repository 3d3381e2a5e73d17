use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::constants::{BUBBLE_CHAR_CAP, GROUP_BUBBLE_CAP, LIST_ITEMS_PER_BUBBLE};

pub const SEE_MORE_BUBBLE: &str =
    "There's more where that came from. Want me to keep going? 👀";

/// Lines a header bubble will accept; anything longer is body text that
/// happens to end with a colon.
const HEADER_MAX_CHARS: usize = 80;

fn list_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^\s*(?:[-*•]|\d+\.)\s+").expect("hardcoded pattern"))
}

/// Split a reply into display bubbles.
///
/// Blank lines delimit logical groups. Within a group, headers become their
/// own bubble, list items are batched three to a bubble, and plain sentences
/// accumulate up to the character cap. A group yields at most
/// [`GROUP_BUBBLE_CAP`] bubbles; when a group or an over-long list is cut
/// short, a single "see more" bubble marks the cut and the remainder is
/// dropped. Output is never empty.
pub fn segment(reply: &str) -> Vec<String> {
    let mut bubbles = Vec::new();

    for group in groups(reply) {
        let mut segmenter = GroupSegmenter::new();
        for line in group {
            segmenter.push_line(line);
        }
        let (mut group_bubbles, truncated) = segmenter.finish();
        bubbles.append(&mut group_bubbles);
        if truncated {
            bubbles.push(SEE_MORE_BUBBLE.to_string());
        }
    }

    if bubbles.is_empty() {
        bubbles.push(reply.trim().to_string());
    }
    bubbles
}

fn groups(reply: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in reply.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

struct GroupSegmenter {
    bubbles: Vec<String>,
    sentences: String,
    list: Vec<String>,
    list_run_flushed: bool,
    truncated: bool,
}

impl GroupSegmenter {
    fn new() -> Self {
        Self {
            bubbles: Vec::new(),
            sentences: String::new(),
            list: Vec::new(),
            list_run_flushed: false,
            truncated: false,
        }
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Some(found) = list_marker().find(trimmed) {
            self.flush_sentences();
            if self.list_run_flushed {
                // A full batch already went out for this list; the rest is
                // behind the "see more" prompt.
                self.truncated = true;
                return;
            }
            self.list.push(format!("• {}", &trimmed[found.end()..]));
            if self.list.len() == LIST_ITEMS_PER_BUBBLE {
                self.flush_list();
                self.list_run_flushed = true;
            }
            return;
        }

        self.flush_list();
        self.list_run_flushed = false;

        if is_header(trimmed) {
            self.flush_sentences();
            self.push_bubble(trimmed.to_string());
            return;
        }

        for sentence in trimmed.unicode_sentences() {
            self.push_sentence(sentence);
        }
    }

    fn push_sentence(&mut self, sentence: &str) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return;
        }
        let pending = self.sentences.chars().count();
        if pending > 0 && pending + 1 + sentence.chars().count() > BUBBLE_CHAR_CAP {
            self.flush_sentences();
        }
        if !self.sentences.is_empty() {
            self.sentences.push(' ');
        }
        self.sentences.push_str(sentence);
    }

    fn flush_sentences(&mut self) {
        if !self.sentences.is_empty() {
            let bubble = std::mem::take(&mut self.sentences);
            self.push_bubble(bubble);
        }
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            let bubble = std::mem::take(&mut self.list).join("\n");
            self.push_bubble(bubble);
        }
    }

    fn push_bubble(&mut self, bubble: String) {
        if self.bubbles.len() >= GROUP_BUBBLE_CAP {
            self.truncated = true;
            return;
        }
        self.bubbles.push(bubble);
    }

    fn finish(mut self) -> (Vec<String>, bool) {
        self.flush_sentences();
        self.flush_list();
        (self.bubbles, self.truncated)
    }
}

fn is_header(line: &str) -> bool {
    line.ends_with(':') && line.chars().count() <= HEADER_MAX_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_plain_text_is_one_bubble() {
        assert_eq!(segment("We have three EQB units in stock."), vec![
            "We have three EQB units in stock.".to_string()
        ]);
    }

    #[test]
    fn sentences_accumulate_up_to_the_cap() {
        let reply = "The EQB is a compact electric SUV. It seats seven. \
                     The usable range is around 420 km in mixed driving, which covers most commutes. \
                     Charging from ten to eighty percent takes about half an hour on a fast charger.";
        let bubbles = segment(reply);
        assert!(bubbles.len() >= 2);
        for bubble in &bubbles {
            // One oversized sentence may stand alone, but merged bubbles stay near the cap.
            assert!(bubble.chars().count() <= 2 * BUBBLE_CHAR_CAP);
        }
    }

    #[test]
    fn headers_become_their_own_bubble() {
        let bubbles = segment("Available models:\nThe EQA and EQB are both in stock.");
        assert_eq!(bubbles[0], "Available models:");
        assert_eq!(bubbles[1], "The EQA and EQB are both in stock.");
    }

    #[test]
    fn three_list_items_fit_one_bubble_without_see_more() {
        let bubbles = segment("- EQA 250\n- EQB 350\n- EQS 450");
        assert_eq!(bubbles, vec!["• EQA 250\n• EQB 350\n• EQS 450".to_string()]);
    }

    #[test]
    fn long_lists_are_cut_after_three_items() {
        let bubbles = segment("- EQA 250\n- EQB 350\n- EQS 450\n- EQE 300\n- G 580");
        assert_eq!(bubbles.len(), 2);
        assert_eq!(bubbles[0].matches('•').count(), 3);
        assert!(!bubbles[0].contains("EQE 300"));
        assert_eq!(bubbles[1], SEE_MORE_BUBBLE);
    }

    #[test]
    fn mixed_markers_are_normalized() {
        let bubbles = segment("* petrol\n• diesel\n1. electric");
        assert_eq!(bubbles, vec!["• petrol\n• diesel\n• electric".to_string()]);
    }

    #[test]
    fn groups_are_independent() {
        let bubbles = segment("First group here.\n\nSecond group here.");
        assert_eq!(bubbles, vec![
            "First group here.".to_string(),
            "Second group here.".to_string()
        ]);
    }

    #[test]
    fn a_group_yields_at_most_three_bubbles_then_see_more() {
        let reply = "Heading one:\nHeading two:\nHeading three:\nHeading four:";
        let bubbles = segment(reply);
        assert_eq!(bubbles.len(), GROUP_BUBBLE_CAP + 1);
        assert_eq!(bubbles.last().map(String::as_str), Some(SEE_MORE_BUBBLE));
    }

    #[test]
    fn output_is_never_empty() {
        assert_eq!(segment("   "), vec![String::new()]);
    }

    #[test]
    fn a_list_followed_by_text_keeps_both() {
        let bubbles = segment("- EQA 250\n- EQB 350\nBoth qualify for free servicing.");
        assert_eq!(bubbles, vec![
            "• EQA 250\n• EQB 350".to_string(),
            "Both qualify for free servicing.".to_string()
        ]);
    }
}
