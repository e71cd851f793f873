//! Session-level control surface tying connectivity, ingestion, and chat.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::AnalysisClient;
use crate::answer::{AnswerProvider, TemplateAnswerProvider};
use crate::config::GlobalConfig;
use crate::conversation::ConversationLog;
use crate::models::message::{Message, MessageAuthor};
use crate::models::video::{IngestionResult, IngestionStatus};
use crate::orchestrator::connectivity::{ConnectivityMonitor, ConnectivityState};
use crate::orchestrator::ingestion::VideoIngestionController;
use crate::{AppError, Result};

/// Coarse session phase derived from the ingestion lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No video active; chat input is gated off.
    Idle,
    /// A video submission is in flight.
    Ingesting,
    /// A video is ready and questions are accepted.
    ReadyForChat,
}

/// Orchestrates one conversational session over a single active video.
pub struct SessionOrchestrator {
    log: Arc<ConversationLog>,
    connectivity: ConnectivityMonitor,
    ingestion: VideoIngestionController,
    provider: Arc<dyn AnswerProvider>,
}

impl SessionOrchestrator {
    /// Build a session with the templated stand-in answer provider.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` when the Analysis Service client cannot be
    /// constructed.
    pub fn new(config: &GlobalConfig) -> Result<Self> {
        let provider = Arc::new(TemplateAnswerProvider::new(Duration::from_millis(
            config.chat.reply_delay_ms,
        )));
        Self::with_provider(config, provider)
    }

    /// Build a session with a caller-supplied answer provider.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` when the Analysis Service client cannot be
    /// constructed.
    pub fn with_provider(
        config: &GlobalConfig,
        provider: Arc<dyn AnswerProvider>,
    ) -> Result<Self> {
        let client = Arc::new(AnalysisClient::new(&config.analysis)?);
        let log = ConversationLog::new();
        log.append(MessageAuthor::Assistant, config.chat.greeting.clone());
        Ok(Self {
            log: Arc::new(log),
            connectivity: ConnectivityMonitor::new(Arc::clone(&client)),
            ingestion: VideoIngestionController::new(client),
            provider,
        })
    }

    /// Current coarse phase of the session.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.ingestion.status() {
            IngestionStatus::Idle | IngestionStatus::Failed => SessionPhase::Idle,
            IngestionStatus::Processing => SessionPhase::Ingesting,
            IngestionStatus::Ready => SessionPhase::ReadyForChat,
        }
    }

    /// Current Analysis Service reachability state.
    #[must_use]
    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity.current()
    }

    /// Current ingestion lifecycle status.
    #[must_use]
    pub fn ingestion_status(&self) -> IngestionStatus {
        self.ingestion.status()
    }

    /// Result of the last successful ingestion, if any.
    #[must_use]
    pub fn ingestion_result(&self) -> Option<IngestionResult> {
        self.ingestion.result()
    }

    /// Snapshot of the conversation in append order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.log.all()
    }

    /// Probe the Analysis Service and record the verdict.
    pub async fn probe_connectivity(&self) -> ConnectivityState {
        self.connectivity.probe().await
    }

    /// Submit a video reference and, on success, post a confirmation into
    /// the conversation.
    ///
    /// Failed submissions surface only through the returned error; the
    /// conversation log is left untouched so the user can retry cleanly.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Rejected` for empty input or a busy pipeline, and
    /// `AppError::Ingestion` when the Analysis Service fails the request.
    pub async fn request_ingestion(&self, video_reference: &str) -> Result<IngestionResult> {
        let result = self.ingestion.submit(video_reference).await?;
        self.log.append(
            MessageAuthor::Assistant,
            format!(
                "Video processed successfully! I've analyzed {} transcript segments. \
                 You can now ask questions about the video.",
                result.segment_count
            ),
        );
        Ok(result)
    }

    /// Handle one chat turn: append the user message, then generate and
    /// append the assistant reply.
    ///
    /// The user message is appended synchronously before any reply work
    /// starts, so concurrent turns interleave but each reply is always
    /// correlated with its own question.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Rejected` when the message is empty or no video is
    /// ready, and `AppError::Answer` when the provider fails or produces an
    /// empty reply; provider failures also post an apology into the
    /// conversation.
    pub async fn send_message(&self, content: &str) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Rejected("message is empty".to_string()));
        }
        if !self.ingestion.status().is_ready() {
            return Err(AppError::Rejected(
                "no video is ready; submit one first".to_string(),
            ));
        }
        let context = self.ingestion.result().ok_or_else(|| {
            AppError::Rejected("no video is ready; submit one first".to_string())
        })?;
        self.log.append(MessageAuthor::User, content);
        info!(video_reference = %context.video_reference, "generating reply");
        let reply = match self.provider.answer(content, &context).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                return Err(self.answer_failure("provider returned an empty reply".to_string()))
            }
            Err(err) => return Err(self.answer_failure(err.to_string())),
        };
        Ok(self.log.append(MessageAuthor::Assistant, reply))
    }

    fn answer_failure(&self, detail: String) -> AppError {
        warn!(error = %detail, "answer generation failed");
        self.log.append(
            MessageAuthor::Assistant,
            "Sorry, I couldn't answer that question. Please try again.",
        );
        AppError::Answer(detail)
    }
}
