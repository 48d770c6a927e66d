//! Word-count guard applied before any model call.

/// Default word ceiling for submitted content
pub const DEFAULT_MAX_WORDS: usize = 5000;

/// Count whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check whether `text` has more than `max_words` words.
///
/// Content is never truncated here; an over-long request is rejected whole.
pub fn is_text_too_long(text: &str, max_words: usize) -> bool {
    word_count(text) > max_words
}
