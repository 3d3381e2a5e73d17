//! Shared constants used across the application

/// Replies shorter than this skip segmentation and render as one bubble.
pub const PASSTHROUGH_MAX_CHARS: usize = 50;

/// Soft cap on a bubble accumulated from plain sentences.
pub const BUBBLE_CHAR_CAP: usize = 100;

/// List items batched into one bubble before the buffer is flushed.
pub const LIST_ITEMS_PER_BUBBLE: usize = 3;

/// Bubbles allowed per blank-line-delimited group before truncation.
pub const GROUP_BUBBLE_CAP: usize = 3;

/// Simulated typing pace for bubble delivery, and its clamp bounds.
/// These keep long bubbles from stalling the transcript and short ones
/// from arriving in a burst.
pub const TYPING_MS_PER_CHAR: u64 = 25;
pub const TYPING_DELAY_MIN_MS: u64 = 350;
pub const TYPING_DELAY_MAX_MS: u64 = 1600;

/// Upload panel display names longer than this are truncated.
pub const UPLOAD_NAME_MAX_CHARS: usize = 20;
