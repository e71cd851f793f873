//! Thin typed wrapper over the Analysis Service HTTP API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::{AppError, Result};

/// Request body for `POST /process-video`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessVideoRequest {
    /// The video reference (URL or identifier) to ingest.
    pub video_reference: String,
}

/// Response body for `POST /process-video`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessVideoResponse {
    /// Whether ingestion succeeded on the remote side.
    pub success: bool,
    /// Number of transcript segments produced; present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<u32>,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remote-reported failure description; present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Client for the Analysis Service endpoints.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
    process_timeout: Duration,
}

impl AnalysisClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|err| AppError::Http(format!("cannot build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            health_timeout: Duration::from_secs(config.health_timeout_seconds),
            process_timeout: Duration::from_secs(config.process_timeout_seconds),
        })
    }

    /// Probe `GET /health`; any 2xx status counts as reachable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` on transport failure or a non-2xx status.
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "probing analysis service health");
        let response = self
            .http
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|err| AppError::Http(format!("health probe failed: {err}")))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Http(format!(
                "health probe returned status {}",
                response.status()
            )))
        }
    }

    /// Submit a video reference to `POST /process-video`.
    ///
    /// A parseable response is returned as-is even when it reports
    /// `success: false`; the caller decides how to surface remote failures.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Ingestion` on transport failure, a non-2xx status,
    /// or an unparseable body.
    pub async fn process_video(&self, video_reference: &str) -> Result<ProcessVideoResponse> {
        let url = format!("{}/process-video", self.base_url);
        debug!(url = %url, video_reference, "submitting video for processing");
        let response = self
            .http
            .post(&url)
            .timeout(self.process_timeout)
            .json(&ProcessVideoRequest {
                video_reference: video_reference.to_string(),
            })
            .send()
            .await
            .map_err(|err| AppError::Ingestion(format!("processing request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Ingestion(format!(
                "processing request returned status {status}"
            )));
        }
        response
            .json::<ProcessVideoResponse>()
            .await
            .map_err(|err| AppError::Ingestion(format!("invalid processing response: {err}")))
    }
}
