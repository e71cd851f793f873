//! Video ingestion lifecycle control.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::analysis::AnalysisClient;
use crate::models::video::{IngestionResult, IngestionStatus};
use crate::{AppError, Result};

#[derive(Debug, Default)]
struct IngestionState {
    status: IngestionStatus,
    result: Option<IngestionResult>,
}

/// Drives a video reference through the asynchronous ingestion lifecycle.
///
/// At most one submission is in flight at a time; a second submission while
/// one is processing is rejected without disturbing the in-flight request.
#[derive(Debug, Clone)]
pub struct VideoIngestionController {
    client: Arc<AnalysisClient>,
    state: Arc<Mutex<IngestionState>>,
}

impl VideoIngestionController {
    /// Create a controller in the `Idle` status.
    #[must_use]
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(IngestionState::default())),
        }
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> IngestionStatus {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status
    }

    /// Result of the last successful ingestion, if any.
    #[must_use]
    pub fn result(&self) -> Option<IngestionResult> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .result
            .clone()
    }

    /// Submit a video reference for ingestion.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Rejected` when the reference is empty or another
    /// submission is already processing, and `AppError::Ingestion` when the
    /// Analysis Service fails the request; failed submissions roll the
    /// status back to `Idle`.
    pub async fn submit(&self, video_reference: &str) -> Result<IngestionResult> {
        let video_reference = video_reference.trim();
        if video_reference.is_empty() {
            return Err(AppError::Rejected("video reference is empty".to_string()));
        }
        self.begin(video_reference)?;
        match self.client.process_video(video_reference).await {
            Ok(response) if response.success => match response.chunk_count {
                Some(segment_count) => {
                    let result =
                        IngestionResult::new(video_reference, segment_count, response.message);
                    self.finish_ready(result.clone());
                    Ok(result)
                }
                None => Err(self.finish_failed(
                    video_reference,
                    "processing response missing segment count".to_string(),
                )),
            },
            Ok(response) => {
                let detail = response
                    .error
                    .filter(|msg| !msg.trim().is_empty())
                    .unwrap_or_else(|| "processing failed".to_string());
                Err(self.finish_failed(video_reference, detail))
            }
            Err(err) => {
                self.rollback(video_reference);
                Err(err)
            }
        }
    }

    /// Atomically move `Idle`/`Ready`/`Failed` into `Processing`.
    fn begin(&self, video_reference: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.status.can_transition_to(IngestionStatus::Processing) {
            return Err(AppError::Rejected(
                "another video is already processing".to_string(),
            ));
        }
        state.status = IngestionStatus::Processing;
        info!(video_reference, "video submitted for processing");
        Ok(())
    }

    fn finish_ready(&self, result: IngestionResult) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        info!(
            video_reference = %result.video_reference,
            segment_count = result.segment_count,
            "video ingestion complete"
        );
        state.status = IngestionStatus::Ready;
        state.result = Some(result);
    }

    fn finish_failed(&self, video_reference: &str, detail: String) -> AppError {
        warn!(video_reference, error = %detail, "video ingestion failed");
        self.reset();
        AppError::Ingestion(detail)
    }

    fn rollback(&self, video_reference: &str) {
        warn!(video_reference, "video ingestion request did not complete");
        self.reset();
    }

    /// Failed submissions leave no partial state behind.
    fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.status = IngestionStatus::Idle;
        state.result = None;
    }
}
