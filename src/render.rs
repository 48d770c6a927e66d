//! User-facing reply texts.
//!
//! Summary replies use Telegram's legacy Markdown, so any text that came from
//! the user or the model is escaped before it is embedded.

use crate::prompt::Audience;
use crate::summary::SummaryResult;
use crate::telegram::{OutgoingMessage, ReplyMarkup};

pub const WORKING: &str = "🔄 Reading and analyzing the content ...";
pub const APOLOGY: &str = "😬 Sorry, something went wrong. Try again with different content.";
pub const CANCELLED: &str = "Cancelled! Use /summarize to start over.";
const AUDIENCE_QUESTION: &str = "First, who's this summary for?";
const AUDIENCE_PLACEHOLDER: &str = "Pick one";

const WELCOME: &str = "Hey there! I'm Spice Summary! 🌶️📖

I can help you to quickly understand any article, text or URL. Just send me a URL or paste some text and I'll give you the key points.

What I do:
• Summarize articles or text
• Adjust for different readers (kids, engineers, etc.)
• Show the overall sentiment
• List the main points

Try /summarize to get started!";

pub fn welcome() -> OutgoingMessage {
    OutgoingMessage::plain(WELCOME)
}

/// Question with the one-time audience keyboard
pub fn audience_menu() -> OutgoingMessage {
    let rows = Audience::MENU.map(|row| row.map(|audience| audience.label()));

    OutgoingMessage::plain(AUDIENCE_QUESTION)
        .with_markup(ReplyMarkup::keyboard(rows, Some(AUDIENCE_PLACEHOLDER)))
}

pub fn content_request(audience: &str, max_words: usize) -> OutgoingMessage {
    OutgoingMessage::plain(format!(
        "Got it - summarizing for a {}!\n\nNow send me the text or a URL to summarize (max ~{} words):",
        audience, max_words
    ))
    .with_markup(ReplyMarkup::remove())
}

pub fn cancelled() -> OutgoingMessage {
    OutgoingMessage::plain(CANCELLED).with_markup(ReplyMarkup::remove())
}

pub fn working() -> OutgoingMessage {
    OutgoingMessage::plain(WORKING)
}

pub fn apology() -> OutgoingMessage {
    OutgoingMessage::plain(APOLOGY)
}

pub fn too_long(max_words: usize) -> OutgoingMessage {
    OutgoingMessage::plain(format!(
        "❌ Oops, text is too long! Please keep it under {} words.",
        max_words
    ))
}

/// Format a summary for the chat
pub fn summary_reply(audience: &str, result: &SummaryResult) -> OutgoingMessage {
    let mut text = format!(
        "*🌶️ Spice Summary for {} 🌶️*\n\n*Summary:*\n{}\n\n*Mood:* {}\n\n*Main Points:*\n",
        strip_markdown(&title_case(audience)),
        escape_markdown(&result.summary),
        result.sentiment
    );

    for point in &result.key_points {
        text.push_str("• ");
        text.push_str(&escape_markdown(point));
        text.push('\n');
    }

    text.push_str("\n_Powered by Spice Summary_");
    OutgoingMessage::markdown(text)
}

/// Capitalise the first letter of each word and lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Drop entity delimiters from text placed inside a bold entity, where
/// legacy Markdown does not honour escapes
fn strip_markdown(text: &str) -> String {
    text.chars().filter(|c| !is_markdown_delimiter(*c)).collect()
}

fn is_markdown_delimiter(c: char) -> bool {
    matches!(c, '_' | '*' | '`' | '[')
}

/// Escape characters that legacy Markdown treats as entity delimiters
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_markdown_delimiter(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markdown_delimiters() {
        assert_eq!(escape_markdown("a_b *c* `d` [e]"), "a\\_b \\*c\\* \\`d\\` \\[e]");
    }

    #[test]
    fn strips_delimiters_inside_entities() {
        assert_eq!(strip_markdown("A*B_C `d` [e]"), "ABC d e]");
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape_markdown("Plain text, 100% safe."), "Plain text, 100% safe.");
    }
}
