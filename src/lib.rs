#![forbid(unsafe_code)]

//! `tubetalk` — session orchestration core for chatting with YouTube videos.
//!
//! The crate drives a single conversational session: it probes the remote
//! Analysis Service for availability, submits a video reference through the
//! asynchronous ingestion lifecycle, and manages the ordered conversation
//! log whose assistant replies are gated on ingestion readiness.

pub mod analysis;
pub mod answer;
pub mod config;
pub mod conversation;
pub mod errors;
pub mod models;
pub mod orchestrator;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
