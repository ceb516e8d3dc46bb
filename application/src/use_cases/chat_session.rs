//! ChatSession - one prompt in, one log record out
//!
//! Implements the per-prompt part of the session loop:
//!
//! ```text
//! Validating ──empty──────────────→ Skipped
//!     │      ──≥ 1000 chars───────→ Rejected
//!     ↓
//! Requesting ──(any outcome)──→ Logging ──→ Completed(TurnReport)
//! ```
//!
//! Reading input, rendering and shutdown belong to the presentation layer.
//! Nothing in here fails the session: every outcome is a value.

use crate::ports::completion_gateway::{CompletionError, CompletionGateway};
use crate::ports::log_storage::LogStorage;
use crate::ports::progress::{NoProgress, TurnProgress};
use crate::use_cases::log_store::{LogAppendError, LogStore};
use chrono::Utc;
use promptlog_domain::{DomainError, LogRecord, Prompt, choice_texts};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the user gets to see for a completed request.
#[derive(Debug)]
pub enum Reply {
    /// Ok status: the text of each choice, possibly none.
    Choices(Vec<String>),
    /// Service or transport failure.
    Failed(CompletionError),
}

/// Result of a prompt that reached the service.
#[derive(Debug)]
pub struct TurnReport {
    pub reply: Reply,
    /// Whether the exchange made it into the log file.
    pub persistence: Result<(), LogAppendError>,
    /// Records kept in memory but missing from the file.
    pub unpersisted: usize,
}

/// Outcome of submitting one line of input.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Empty input; nothing happened.
    Skipped,
    /// Input failed validation; the service was not contacted.
    Rejected(DomainError),
    /// The request was made and logged (or logging was attempted).
    Completed(TurnReport),
}

/// Session state: the completion gateway and the log it records to.
pub struct ChatSession<G: CompletionGateway, S: LogStorage> {
    gateway: Arc<G>,
    log: LogStore<S>,
}

impl<G: CompletionGateway, S: LogStorage> ChatSession<G, S> {
    pub fn new(gateway: Arc<G>, log: LogStore<S>) -> Self {
        Self { gateway, log }
    }

    /// Submit one line of input without progress reporting.
    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        self.submit_with_progress(input, &NoProgress).await
    }

    /// Submit one line of input.
    pub async fn submit_with_progress(
        &mut self,
        input: &str,
        progress: &dyn TurnProgress,
    ) -> TurnOutcome {
        let prompt = match Prompt::new(input) {
            Ok(prompt) => prompt,
            Err(e) if e.is_silent() => return TurnOutcome::Skipped,
            Err(e) => {
                debug!("Rejected prompt: {}", e);
                return TurnOutcome::Rejected(e);
            }
        };

        let created_at = Utc::now();

        progress.on_request_start();
        let result = self.gateway.complete(&prompt).await;
        progress.on_request_complete(result.is_ok());

        let (response, reply) = match result {
            Ok(payload) => {
                let texts = choice_texts(&payload);
                info!("Received {} choice(s)", texts.len());
                (payload, Reply::Choices(texts))
            }
            Err(error) => {
                warn!("Completion request failed: {}", error);
                (error.log_payload(), Reply::Failed(error))
            }
        };

        let record = LogRecord::user(&prompt, response, created_at);
        let persistence = self.log.append(record).await;
        if let Err(e) = &persistence {
            warn!("Log append failed: {}", e);
        }

        TurnOutcome::Completed(TurnReport {
            reply,
            persistence,
            unpersisted: self.log.unpersisted(),
        })
    }

    pub fn log(&self) -> &LogStore<S> {
        &self.log
    }
}
