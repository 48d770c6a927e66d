//! Prompt construction for the summarization model.

use std::fmt;

/// Default number of content characters embedded in a prompt
pub const DEFAULT_PROMPT_CHARS: usize = 4000;

/// Instruction used when the audience label is not recognised
pub const GENERIC_INSTRUCTION: &str = "Summarize this clearly:";

/// Output-format directive appended after the audience instruction
const FORMAT_DIRECTIVE: &str = "Please provide:
1. A brief summary
2. The overall sentiment (Positive/Negative/Neutral)
3. 3-5 key points as bullet points";

/// Reader the summary is tailored for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Kid,
    Engineer,
    Scientist,
    BusyWorker,
    /// Any label outside the known set
    General,
}

impl Audience {
    /// Choices offered in the selection menu, two per row
    pub const MENU: [[Audience; 2]; 2] = [
        [Audience::Kid, Audience::Engineer],
        [Audience::Scientist, Audience::BusyWorker],
    ];

    /// Resolve a free-form label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "kid" => Audience::Kid,
            "engineer" => Audience::Engineer,
            "scientist" => Audience::Scientist,
            "busy worker" => Audience::BusyWorker,
            _ => Audience::General,
        }
    }

    /// Menu label for this audience
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Kid => "Kid",
            Audience::Engineer => "Engineer",
            Audience::Scientist => "Scientist",
            Audience::BusyWorker => "Busy Worker",
            Audience::General => "General",
        }
    }

    /// Tone and detail instruction for the model
    pub fn instruction(&self) -> &'static str {
        match self {
            Audience::Kid => {
                "Explain this like you're talking to a 10-year-old. Use simple words and fun examples."
            }
            Audience::Engineer => "Focus on technical details, specifications, and how things work.",
            Audience::Scientist => {
                "Be precise and analytical. Highlight methods, data, and conclusions."
            }
            Audience::BusyWorker => {
                "Get straight to the point. Focus on key takeaways and action items."
            }
            Audience::General => GENERIC_INSTRUCTION,
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Take at most `max_chars` characters from the start of `text`
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the full prompt for `text` tailored to the `audience` label.
///
/// Unknown labels fall back to [`GENERIC_INSTRUCTION`]. Content is cut to
/// `max_chars` characters regardless of how many words it has.
pub fn build_prompt(text: &str, audience: &str, max_chars: usize) -> String {
    let instruction = Audience::from_label(audience).instruction();

    format!(
        "{}\n\n{}\n\nText to analyze:\n{}\n",
        instruction,
        FORMAT_DIRECTIVE,
        excerpt(text, max_chars)
    )
}
