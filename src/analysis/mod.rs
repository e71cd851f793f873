//! HTTP client for the remote Analysis Service.

mod client;

pub use client::{AnalysisClient, ProcessVideoRequest, ProcessVideoResponse};
