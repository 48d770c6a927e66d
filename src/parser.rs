//! Line-oriented parser for the model's free-text reply.
//!
//! The reply has no guaranteed structure, so parsing never fails. Each
//! non-empty line is either a section header (which switches the current
//! [`Section`] and is otherwise discarded) or content for the current
//! section. Header checks run in a fixed order: summary, then sentiment,
//! then key points. Changing that order changes which section wins for
//! ambiguous lines.
//!
//! Any line containing `-` or `•` counts as a key-points header, so a bullet
//! line written as `- point` is consumed as a header rather than collected.
//! Prose that happens to contain a hyphen is affected the same way.

use crate::summary::{Sentiment, SummaryResult};

/// Minimum length (exclusive, in characters) of a summary line
const MIN_SUMMARY_CHARS: usize = 10;

/// Minimum length (exclusive, in characters) of a key point line
const MIN_CLAIM_CHARS: usize = 5;

/// Key points collected before further lines are ignored
const MAX_COLLECTED_CLAIMS: usize = 5;

const BULLET_MARKERS: [char; 2] = ['•', '-'];

/// Section the parser is currently collecting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    Summary,
    Sentiment,
    Claims,
}

impl Section {
    /// Classify a trimmed line as a section header, if it is one
    pub fn header(line: &str) -> Option<Section> {
        let lower = line.to_lowercase();

        if lower.contains("summary") || line.contains("1.") {
            Some(Section::Summary)
        } else if lower.contains("sentiment") || line.contains("2.") {
            Some(Section::Sentiment)
        } else if lower.contains("key")
            || line.contains("3.")
            || line.contains(BULLET_MARKERS.as_slice())
        {
            Some(Section::Claims)
        } else {
            None
        }
    }
}

/// Parse a raw model reply into a fully populated [`SummaryResult`]
pub fn parse_response(response: &str) -> SummaryResult {
    let mut section = Section::None;
    let mut summary: Option<String> = None;
    let mut sentiment = Sentiment::default();
    let mut claims: Vec<String> = Vec::new();

    for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(next) = Section::header(line) {
            section = next;
            continue;
        }

        match section {
            Section::None => {}
            Section::Summary => {
                if line.chars().count() > MIN_SUMMARY_CHARS {
                    summary = Some(line.to_string());
                }
            }
            Section::Sentiment => {
                if let Some(found) = Sentiment::ALL.into_iter().find(|s| line.contains(s.as_str())) {
                    sentiment = found;
                }
            }
            Section::Claims => {
                if line.chars().count() > MIN_CLAIM_CHARS {
                    let claim = strip_bullet(line);
                    if !claim.is_empty() && claims.len() < MAX_COLLECTED_CLAIMS {
                        claims.push(claim.to_string());
                    }
                }
            }
        }
    }

    SummaryResult::new(summary, sentiment, claims)
}

/// Remove leading and trailing bullet markers and spaces
fn strip_bullet(line: &str) -> &str {
    line.trim_matches(|c: char| c == ' ' || BULLET_MARKERS.contains(&c))
        .trim()
}
