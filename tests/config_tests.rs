use spice::config::{Config, ConfigError};
use std::io::Write;

#[test]
fn test_defaults_without_file_content() {
    let config = Config::from_toml_str("").expect("empty config should parse");

    assert_eq!(config.agent.provider, "gemini");
    assert_eq!(config.agent.model, "gemini-2.0-flash");
    assert_eq!(config.limits.max_words, 5000);
    assert_eq!(config.limits.prompt_chars, 4000);
    assert_eq!(config.telegram.api_url, "https://api.telegram.org");
    assert_eq!(config.telegram.poll_timeout_secs, 30);
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_toml_str(
        r#"
        [agent]
        model = "gemini-2.5-flash"

        [limits]
        max_words = 1200
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.agent.provider, "gemini");
    assert_eq!(config.agent.model, "gemini-2.5-flash");
    assert_eq!(config.limits.max_words, 1200);
    assert_eq!(config.limits.prompt_chars, 4000);
}

#[test]
fn test_missing_credentials() {
    let config = Config::from_toml_str("").expect("empty config should parse");

    assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey(p)) if p == "gemini"));
    assert!(matches!(config.telegram_token(), Err(ConfigError::MissingToken)));
}

#[test]
fn test_credentials_from_file() {
    let config = Config::from_toml_str(
        r#"
        [api]
        gemini_key = "g-key"
        telegram_token = "123:abc"
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.api_key().ok(), Some("g-key"));
    assert_eq!(config.telegram_token().ok(), Some("123:abc"));
}

#[test]
fn test_unknown_provider_reports_provider() {
    let config = Config::from_toml_str("[agent]\nprovider = \"openai\"").expect("config should parse");

    assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey(p)) if p == "openai"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml_str("[limits]\nmax_words = \"lots\"");

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[telegram]\npoll_timeout_secs = 10").expect("write config");

    let config = Config::load_from(file.path()).expect("config should load");

    assert_eq!(config.telegram.poll_timeout_secs, 10);
}

#[test]
fn test_load_from_missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Config::load_from(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}
