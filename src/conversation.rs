//! Per-chat conversation state machine.
//!
//! ```text
//! Idle --/summarize--> SelectingAudience --text--> ProcessingContent --text--> Idle
//!                            |                            |
//!                            +----------/cancel-----------+--> Idle
//! ```
//!
//! A chat with no entry in the store is `Idle`. Reaching `Idle` removes the
//! entry, so the audience chosen in one session never reaches the next.

use crate::telegram::ChatId;
use std::collections::HashMap;

/// Commands the bot reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Summarize,
    Cancel,
    Other(String),
}

impl Command {
    fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "summarize" | "summarise" => Command::Summarize,
            "cancel" => Command::Cancel,
            other => Command::Other(other.to_string()),
        }
    }
}

/// Classified incoming text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Command(Command),
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// Classify a message; `/name` and `/name@BotName` are commands
    pub fn parse(text: &'a str) -> Self {
        let Some(rest) = text.trim_start().strip_prefix('/') else {
            return Input::Text(text);
        };

        let word = rest.split(char::is_whitespace).next().unwrap_or_default();
        let name = word.split('@').next().unwrap_or_default();

        if name.is_empty() {
            Input::Text(text)
        } else {
            Input::Command(Command::parse(name))
        }
    }
}

/// Content to summarize together with the audience it is meant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub raw_input: String,
    pub audience: String,
}

/// Where a chat currently is in the flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    SelectingAudience,
    ProcessingContent { audience: String },
}

/// What the bot should do in response to an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Show the welcome text; state is unchanged
    Welcome,
    /// Present the audience menu
    AskAudience,
    /// Confirm the audience and ask for content
    AskContent { audience: String },
    /// Run the summary pipeline; the session has already ended
    Process(SummaryRequest),
    /// Acknowledge cancellation
    Cancelled,
    /// Nothing to do
    Ignore,
}

/// Session store keyed by chat.
#[derive(Debug, Default)]
pub struct Conversations {
    sessions: HashMap<ChatId, ConversationState>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `chat_id`
    pub fn state(&self, chat_id: ChatId) -> ConversationState {
        self.sessions.get(&chat_id).cloned().unwrap_or_default()
    }

    /// Number of chats that are not idle
    pub fn active(&self) -> usize {
        self.sessions.len()
    }

    /// Apply `input` to the session of `chat_id`
    pub fn handle(&mut self, chat_id: ChatId, input: Input<'_>) -> Transition {
        let state = self.state(chat_id);

        match (state, input) {
            (_, Input::Command(Command::Start | Command::Help)) => Transition::Welcome,
            (_, Input::Command(Command::Summarize)) => {
                self.sessions.insert(chat_id, ConversationState::SelectingAudience);
                Transition::AskAudience
            }
            (ConversationState::Idle, _) => Transition::Ignore,
            (_, Input::Command(Command::Cancel)) => {
                self.sessions.remove(&chat_id);
                Transition::Cancelled
            }
            (_, Input::Command(Command::Other(_))) => Transition::Ignore,
            (ConversationState::SelectingAudience, Input::Text(choice)) => {
                let audience = choice.to_string();
                self.sessions.insert(
                    chat_id,
                    ConversationState::ProcessingContent {
                        audience: audience.clone(),
                    },
                );
                Transition::AskContent { audience }
            }
            (ConversationState::ProcessingContent { audience }, Input::Text(content)) => {
                self.sessions.remove(&chat_id);
                Transition::Process(SummaryRequest {
                    raw_input: content.to_string(),
                    audience,
                })
            }
        }
    }
}
