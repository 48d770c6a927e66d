//! Telegram Bot API transport.
//!
//! Long-polls `getUpdates` and sends replies with `sendMessage` and
//! `deleteMessage` over plain reqwest calls. The bot only depends on the
//! [`ChatTransport`] trait, so tests can swap in an in-memory transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Extra time allowed on top of the long-poll timeout before giving up
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

pub type ChatId = i64;
pub type MessageId = i64;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to reach Telegram: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// Incoming update from getUpdates; only text messages are used
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

/// Reply markup attached to an outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        one_time_keyboard: bool,
        resize_keyboard: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        input_field_placeholder: Option<String>,
    },
    Remove {
        remove_keyboard: bool,
    },
}

impl ReplyMarkup {
    /// One-time selection keyboard built from rows of labels
    pub fn keyboard<R, L>(rows: R, placeholder: Option<&str>) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = L>,
        L: Into<String>,
    {
        ReplyMarkup::Keyboard {
            keyboard: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|label| KeyboardButton { text: label.into() })
                        .collect()
                })
                .collect(),
            one_time_keyboard: true,
            resize_keyboard: true,
            input_field_placeholder: placeholder.map(str::to_string),
        }
    }

    /// Hide a previously shown keyboard
    pub fn remove() -> Self {
        ReplyMarkup::Remove {
            remove_keyboard: true,
        }
    }
}

/// A message to be sent to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl OutgoingMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            ..Self::plain(text)
        }
    }

    pub fn with_markup(mut self, markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Chat transport used by the bot
#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Fetch updates with an id of at least `offset`
    async fn receive(&self, offset: i64) -> Result<Vec<Update>, TransportError>;

    /// Send a message and return its id
    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> Result<MessageId, TransportError>;

    /// Delete a previously sent message
    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError>;
}

/// Bot API envelope: `{"ok": bool, "result": ..., "description": ...}`
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: MessageId,
}

/// Telegram Bot API client
pub struct TelegramClient {
    http: Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(poll_timeout + HTTP_TIMEOUT_MARGIN)
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            poll_timeout,
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, TransportError> {
        let url = format!("{}/{}", self.base_url, method);
        let response: ApiResponse<T> = self.http.post(&url).json(&body).send().await?.json().await?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(TransportError::Api(
                description.unwrap_or_else(|| format!("{} failed", method)),
            )),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn receive(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        let body = json!({
            "offset": offset,
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message"],
        });
        self.call("getUpdates", body).await
    }

    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> Result<MessageId, TransportError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": message.text,
        });
        if let Some(mode) = message.parse_mode {
            body["parse_mode"] = json!(mode);
        }
        if let Some(markup) = message.reply_markup {
            body["reply_markup"] = json!(markup);
        }

        let sent: SentMessage = self.call("sendMessage", body).await?;
        debug!(chat_id, message_id = sent.message_id, "message sent");
        Ok(sent.message_id)
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        let body = json!({
            "chat_id": chat_id,
            "message_id": message_id,
        });
        let _deleted: bool = self.call("deleteMessage", body).await?;
        Ok(())
    }
}
