//! Bot driver: polls the transport, advances each chat's conversation and
//! runs the summary pipeline for submitted content.

use crate::agent::{self, Generator};
use crate::config::LimitsConfig;
use crate::conversation::{Conversations, Input, SummaryRequest, Transition};
use crate::guard::is_text_too_long;
use crate::render;
use crate::scraper::{self, PageExtractor};
use crate::summary::SummaryResult;
use crate::telegram::{ChatId, ChatTransport, TransportError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

/// Pause after a failed poll before polling again
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(5);

/// How a processing step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Summarized(SummaryResult),
    TooLong,
    ExtractionFailed,
}

/// Acquire, guard, prompt, call and parse for one request
pub struct Pipeline {
    extractor: Arc<dyn PageExtractor>,
    generator: Arc<dyn Generator>,
    limits: LimitsConfig,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn PageExtractor>,
        generator: Arc<dyn Generator>,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            extractor,
            generator,
            limits,
        }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub async fn run(&self, request: &SummaryRequest) -> Outcome {
        let text = match scraper::acquire(&request.raw_input, self.extractor.as_ref()).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "content extraction failed");
                return Outcome::ExtractionFailed;
            }
        };

        if is_text_too_long(&text, self.limits.max_words) {
            info!(max_words = self.limits.max_words, "content rejected as too long");
            return Outcome::TooLong;
        }

        let result = agent::summarize(
            self.generator.as_ref(),
            &text,
            &request.audience,
            self.limits.prompt_chars,
        )
        .await;
        Outcome::Summarized(result)
    }
}

/// Sends replies for a chat and runs processing steps.
pub struct Responder<T: ChatTransport> {
    transport: Arc<T>,
    pipeline: Arc<Pipeline>,
}

impl<T: ChatTransport> Clone for Responder<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<T: ChatTransport> Responder<T> {
    /// Run the pipeline for `request` and reply with the result.
    ///
    /// The working message is removed on every path once the reply is sent.
    pub async fn process(&self, chat_id: ChatId, request: SummaryRequest) -> Outcome {
        let working = match self.transport.send(chat_id, render::working()).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(chat_id, error = %e, "failed to send working message");
                None
            }
        };

        let outcome = self.pipeline.run(&request).await;

        let reply = match &outcome {
            Outcome::Summarized(result) => render::summary_reply(&request.audience, result),
            Outcome::TooLong => render::too_long(self.pipeline.limits().max_words),
            Outcome::ExtractionFailed => render::apology(),
        };
        if let Err(e) = self.transport.send(chat_id, reply).await {
            error!(chat_id, error = %e, "failed to send reply");
        }

        if let Some(message_id) = working {
            if let Err(e) = self.transport.delete(chat_id, message_id).await {
                warn!(chat_id, message_id, error = %e, "failed to delete working message");
            }
        }

        outcome
    }
}

/// Conversation driver over a [`ChatTransport`]
pub struct Bot<T: ChatTransport> {
    responder: Responder<T>,
    conversations: Conversations,
    tasks: JoinSet<Outcome>,
}

impl<T: ChatTransport> Bot<T> {
    pub fn new(transport: Arc<T>, pipeline: Pipeline) -> Self {
        Self {
            responder: Responder {
                transport,
                pipeline: Arc::new(pipeline),
            },
            conversations: Conversations::new(),
            tasks: JoinSet::new(),
        }
    }

    pub fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    /// Number of processing steps still running
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Handle one text message from `chat_id`.
    ///
    /// Content submissions are processed on a separate task owned by the bot;
    /// every other transition is answered before this returns.
    pub async fn handle_message(&mut self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        let transition = self.conversations.handle(chat_id, Input::parse(text));
        debug!(chat_id, ?transition, "conversation transition");

        let transport = &self.responder.transport;
        match transition {
            Transition::Welcome => {
                transport.send(chat_id, render::welcome()).await?;
            }
            Transition::AskAudience => {
                transport.send(chat_id, render::audience_menu()).await?;
            }
            Transition::AskContent { audience } => {
                let max_words = self.responder.pipeline.limits().max_words;
                transport
                    .send(chat_id, render::content_request(&audience, max_words))
                    .await?;
            }
            Transition::Cancelled => {
                transport.send(chat_id, render::cancelled()).await?;
            }
            Transition::Process(request) => {
                let responder = self.responder.clone();
                self.tasks
                    .spawn(async move { responder.process(chat_id, request).await });
            }
            Transition::Ignore => {}
        }

        Ok(())
    }

    /// Wait for every running processing step and return their outcomes
    pub async fn drain(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(joined) = self.tasks.join_next().await {
            if let Some(outcome) = Self::joined(joined) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Collect processing steps that have already finished
    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            Self::joined(joined);
        }
    }

    fn joined(joined: Result<Outcome, JoinError>) -> Option<Outcome> {
        match joined {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(error = %e, "processing task failed");
                None
            }
        }
    }

    /// Long-poll for updates until Ctrl-C is received
    pub async fn run(self) -> Result<(), TransportError> {
        self.run_until(tokio::signal::ctrl_c()).await
    }

    /// Long-poll for updates until `shutdown` completes.
    ///
    /// Processing steps already started are allowed to finish before this
    /// returns.
    pub async fn run_until<F: Future>(mut self, shutdown: F) -> Result<(), TransportError> {
        let mut offset = 0;
        tokio::pin!(shutdown);
        info!("bot is running");

        loop {
            self.reap();

            let polled = tokio::select! {
                _ = &mut shutdown => None,
                updates = self.responder.transport.receive(offset) => Some(updates),
            };

            let Some(updates) = polled else {
                info!(in_flight = self.tasks.len(), "shutting down");
                self.drain().await;
                return Ok(());
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(e) => {
                    error!(error = %e, "failed to poll for updates");
                    tokio::time::sleep(POLL_ERROR_PAUSE).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text else {
                    continue;
                };

                if let Err(e) = self.handle_message(message.chat.id, &text).await {
                    error!(chat_id = message.chat.id, error = %e, "failed to answer message");
                }
            }
        }
    }
}
