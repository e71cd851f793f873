//! Global configuration parsing, validation, and environment overrides.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Environment variable that overrides the Analysis Service base URL.
pub const ANALYSIS_URL_ENV: &str = "TUBETALK_ANALYSIS_URL";

/// Nested configuration for the remote Analysis Service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Base URL of the Analysis Service API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
    /// Per-request timeout for the health probe.
    #[serde(default = "default_health_timeout_seconds")]
    pub health_timeout_seconds: u64,
    /// Per-request timeout for video processing; ingestion can take a while.
    #[serde(default = "default_process_timeout_seconds")]
    pub process_timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_health_timeout_seconds() -> u64 {
    5
}

fn default_process_timeout_seconds() -> u64 {
    120
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            health_timeout_seconds: default_health_timeout_seconds(),
            process_timeout_seconds: default_process_timeout_seconds(),
        }
    }
}

/// Nested configuration for the conversational surface.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ChatConfig {
    /// Assistant greeting seeded into every new conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Artificial delay before each templated reply, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_greeting() -> String {
    "Hi! Paste a YouTube URL and I'll help you understand the video content. \
     What would you like to know?"
        .to_string()
}

fn default_reply_delay_ms() -> u64 {
    1500
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Analysis Service connection settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Conversation settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

impl GlobalConfig {
    /// Load configuration from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the file cannot be read, parsed, or
    /// fails validation.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            AppError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Environment overrides are applied separately via
    /// [`Self::load_env_overrides`] so parsing stays deterministic.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values and
    /// re-validate the result.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when an override fails validation.
    pub fn load_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var(ANALYSIS_URL_ENV) {
            if url.trim().is_empty() {
                warn!(var = ANALYSIS_URL_ENV, "ignoring empty URL override");
            } else {
                self.analysis.base_url = url;
            }
        }
        self.validate()
    }

    /// Validate semantic constraints the TOML grammar cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first violated constraint.
    pub fn validate(&mut self) -> Result<()> {
        let url = reqwest::Url::parse(&self.analysis.base_url).map_err(|err| {
            AppError::Config(format!(
                "invalid analysis.base_url '{}': {err}",
                self.analysis.base_url
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "analysis.base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.analysis.connect_timeout_seconds == 0 {
            return Err(AppError::Config(
                "analysis.connect_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.analysis.health_timeout_seconds == 0 {
            return Err(AppError::Config(
                "analysis.health_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.analysis.process_timeout_seconds == 0 {
            return Err(AppError::Config(
                "analysis.process_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        // The client joins endpoint paths onto the base; a trailing slash
        // would produce `//health`.
        while self.analysis.base_url.ends_with('/') {
            self.analysis.base_url.pop();
        }
        Ok(())
    }
}
