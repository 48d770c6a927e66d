//! # Spice
//!
//! A Telegram bot that summarizes articles and text for a chosen audience
//! using LLMs.
//!
//! ## Features
//!
//! - **Audience Tailoring**: Kid, Engineer, Scientist or Busy Worker tone, with a generic fallback
//! - **Tolerant Parsing**: Free-text model replies become a typed `SummaryResult`
//! - **URL or Text**: Article text is extracted from web pages with scraper

pub mod agent;
pub mod bot;
pub mod config;
pub mod conversation;
pub mod guard;
pub mod parser;
pub mod prompt;
pub mod render;
pub mod scraper;
pub mod summary;
pub mod telegram;

pub use bot::{Bot, Outcome, Pipeline};
pub use config::Config;
pub use summary::{Sentiment, SummaryResult};

/// Initialise tracing output, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
