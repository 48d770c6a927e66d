//! SummaryResult - the structured output shown to the user.
//!
//! Every field always carries a value. Two producers exist: the response
//! parser (which falls back to [`SUMMARY_NOT_AVAILABLE`] and
//! [`KEY_POINTS_NOT_AVAILABLE`] when a section is missing) and
//! [`SummaryResult::unavailable`], used when the model call itself fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary text used when the reply had no usable summary line
pub const SUMMARY_NOT_AVAILABLE: &str = "Not available";

/// Single key point used when the reply had no usable bullet lines
pub const KEY_POINTS_NOT_AVAILABLE: &str = "Key points not available";

/// Summary text used when the model could not be reached
pub const SERVICE_UNAVAILABLE_SUMMARY: &str = "Sorry, I couldn't process that request right now.";

/// Single key point used when the model could not be reached
pub const SERVICE_UNAVAILABLE_POINT: &str = "Service temporarily unavailable";

/// Upper bound on key points handed to rendering
pub const MAX_KEY_POINTS: usize = 4;

/// Overall tone of the summarized content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Labels in the order they are matched against a reply line
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured summary of one piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// One-line summary of the content
    pub summary: String,
    /// Overall sentiment label
    pub sentiment: Sentiment,
    /// Main takeaways, at most [`MAX_KEY_POINTS`]
    pub key_points: Vec<String>,
}

impl SummaryResult {
    /// Create a result, applying the placeholder defaults for empty fields
    pub fn new(summary: Option<String>, sentiment: Sentiment, mut key_points: Vec<String>) -> Self {
        key_points.truncate(MAX_KEY_POINTS);
        if key_points.is_empty() {
            key_points.push(KEY_POINTS_NOT_AVAILABLE.to_string());
        }

        Self {
            summary: summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| SUMMARY_NOT_AVAILABLE.to_string()),
            sentiment,
            key_points,
        }
    }

    /// Fixed result returned when the generative service call fails
    pub fn unavailable() -> Self {
        Self {
            summary: SERVICE_UNAVAILABLE_SUMMARY.to_string(),
            sentiment: Sentiment::Neutral,
            key_points: vec![SERVICE_UNAVAILABLE_POINT.to_string()],
        }
    }

    /// Whether this is the fixed service-unavailable result
    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}
