//! Content acquisition: literal text, or the main text of a web article.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// User-Agent string identifying this scraper
const USER_AGENT: &str = concat!("spice/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Paragraph-level text shorter than this is treated as boilerplate
const MIN_BLOCK_CHARS: usize = 20;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("no article content found at URL")]
    NoContent,
}

/// Page fetch-and-extract capability
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch `url` and return its main readable text
    async fn fetch_and_extract(&self, url: &str) -> Result<String, ExtractionError>;
}

/// Check whether the input should be fetched rather than used as-is
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Turn user input into plain text, fetching it first when it is a URL
pub async fn acquire(input: &str, extractor: &dyn PageExtractor) -> Result<String, ExtractionError> {
    if is_url(input) {
        debug!(url = input, "extracting article text");
        extractor.fetch_and_extract(input).await
    } else {
        Ok(input.to_string())
    }
}

/// [`PageExtractor`] backed by a reqwest client and HTML heuristics
#[derive(Debug, Clone)]
pub struct WebExtractor {
    client: Client,
}

impl WebExtractor {
    /// Create an extractor with a configured HTTP client
    pub fn new() -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageExtractor for WebExtractor {
    async fn fetch_and_extract(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "article fetch rejected");
            return Err(ExtractionError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let text = extract_text(&Html::parse_document(&html));

        if text.trim().is_empty() {
            return Err(ExtractionError::NoContent);
        }

        Ok(text)
    }
}

/// Extract readable text content from the page
fn extract_text(document: &Html) -> String {
    // Try to find main content areas first
    let main_selectors = ["article", "main", "[role='main']", ".content", "#content"];

    for selector_str in main_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = extract_text_blocks(&Html::parse_fragment(&element.html()));
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }

    // Fall back to the whole document
    extract_text_blocks(document)
}

/// Extract text from paragraphs, headings and list items
fn extract_text_blocks(document: &Html) -> String {
    let Ok(content_selector) = Selector::parse("p, h1, h2, h3, h4, h5, h6, li") else {
        return String::new();
    };

    document
        .select(&content_selector)
        .map(|element| {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|cleaned| cleaned.chars().count() > MIN_BLOCK_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_article_body_over_navigation() {
        let html = r#"
            <html><body>
              <nav><p>Home | About | Contact us for more information today</p></nav>
              <article>
                <h1>City approves the new transit budget plan</h1>
                <p>The council voted seven to two in favour of the proposal.</p>
                <p>short</p>
              </article>
            </body></html>"#;

        let text = extract_text(&Html::parse_document(html));

        assert_eq!(
            text,
            "City approves the new transit budget plan\n\n\
             The council voted seven to two in favour of the proposal."
        );
    }

    #[test]
    fn falls_back_to_document_paragraphs() {
        let html = "<html><body><div><p>  Plain   page text that is long enough to keep.  </p></div></body></html>";

        let text = extract_text(&Html::parse_document(html));

        assert_eq!(text, "Plain page text that is long enough to keep.");
    }

    #[test]
    fn page_without_text_blocks_is_empty() {
        let html = "<html><body><script>var x = 1;</script></body></html>";

        assert!(extract_text(&Html::parse_document(html)).is_empty());
    }
}
