use spice::setup_logging;

#[test]
fn test_logging_setup_is_repeatable() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging should not panic when called twice");
}
