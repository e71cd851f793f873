//! Video ingestion lifecycle model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of the video ingestion pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    /// No video submitted, or the last submission was rolled back.
    #[default]
    Idle,
    /// A submission is in flight with the Analysis Service.
    Processing,
    /// The video was analyzed and the session can answer questions about it.
    Ready,
    /// The last submission ended in a remote-reported failure.
    Failed,
}

impl IngestionStatus {
    /// Whether a transition from `self` to `target` is legal.
    ///
    /// Only one submission may be in flight at a time, and a finished
    /// pipeline (ready or failed) can only restart by processing a new
    /// submission.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle | Self::Ready | Self::Failed, Self::Processing)
                | (Self::Processing, Self::Ready | Self::Failed | Self::Idle)
        )
    }

    /// Whether the session is allowed to answer questions in this status.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Outcome of a successful video ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestionResult {
    /// The video reference the user submitted.
    pub video_reference: String,
    /// Number of transcript segments the Analysis Service produced.
    pub segment_count: u32,
    /// Human-readable status message reported by the Analysis Service.
    pub message: Option<String>,
    /// When ingestion completed.
    pub completed_at: DateTime<Utc>,
}

impl IngestionResult {
    /// Record a completed ingestion stamped with the current time.
    #[must_use]
    pub fn new(
        video_reference: impl Into<String>,
        segment_count: u32,
        message: Option<String>,
    ) -> Self {
        Self {
            video_reference: video_reference.into(),
            segment_count,
            message,
            completed_at: Utc::now(),
        }
    }
}
