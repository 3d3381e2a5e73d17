//! The client message pipeline: turns one raw backend reply into an
//! ordered, non-empty sequence of short display-ready bubbles.
//!
//! This is heuristic string formatting, not parsing: the only promise is
//! visually reasonable chunking. [`segment_reply`] is the whole pipeline;
//! the submodules are its stages.

pub mod casual;
pub mod followup;
pub mod formatter;
pub mod segmenter;

#[cfg(test)]
mod tests;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::constants::PASSTHROUGH_MAX_CHARS;

/// Shown when the backend answered but none of the reply fields carried text.
pub const EMPTY_REPLY_FALLBACK: &str = "Received response from server";

/// Run the full pipeline for one exchange.
///
/// Small-talk inputs short-circuit to a single canned bubble and short
/// replies pass through untouched; everything else is segmented, given the
/// cosmetic pass, and closed with a contextual follow-up question.
pub fn segment_reply(query: &str, reply: &str) -> Vec<String> {
    if let Some(kind) = casual::detect(query) {
        return vec![casual::canned_reply(kind, query)];
    }

    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return vec![EMPTY_REPLY_FALLBACK.to_string()];
    }
    if trimmed.chars().count() < PASSTHROUGH_MAX_CHARS {
        return vec![trimmed.to_string()];
    }

    let mut bubbles: Vec<String> = segmenter::segment(trimmed)
        .iter()
        .map(|bubble| formatter::polish(bubble))
        .collect();

    if let Some(last) = bubbles.last_mut() {
        *last = formatter::ensure_call_to_action(last);
    }

    bubbles.push(followup::question_for(query));
    bubbles
}

/// Deterministic pool index for a seed string. `DefaultHasher::new()` uses
/// fixed keys, so the pick is stable across runs and testable.
pub(crate) fn stable_index(seed: &str, len: usize) -> usize {
    debug_assert!(len > 0);
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    (hasher.finish() % len as u64) as usize
}
