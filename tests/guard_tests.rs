use spice::guard::{is_text_too_long, word_count, DEFAULT_MAX_WORDS};

#[test]
fn test_word_limit_boundary() {
    let exactly = vec!["word"; DEFAULT_MAX_WORDS].join(" ");
    let over = vec!["word"; DEFAULT_MAX_WORDS + 1].join(" ");

    assert!(!is_text_too_long(&exactly, DEFAULT_MAX_WORDS));
    assert!(is_text_too_long(&over, DEFAULT_MAX_WORDS));
}

#[test]
fn test_word_count_splits_on_any_whitespace() {
    assert_eq!(word_count("  one\ttwo\n\nthree   four "), 4);
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count(" \n\t "), 0);
}

#[test]
fn test_custom_ceiling() {
    assert!(!is_text_too_long("a b c", 3));
    assert!(is_text_too_long("a b c d", 3));
}
