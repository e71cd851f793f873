//! Pluggable answer generation for chat turns.

use std::future::Future;
use std::pin::Pin;

use crate::models::video::IngestionResult;
use crate::Result;

mod template;

pub use template::TemplateAnswerProvider;

/// Boxed future returned by [`AnswerProvider::answer`].
pub type AnswerFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Produces an assistant reply for a single chat turn.
///
/// Implementations receive the user's query together with the ingestion
/// result of the active video and must resolve to a non-empty reply or an
/// error. The orchestrator never calls a provider before ingestion is ready.
pub trait AnswerProvider: Send + Sync {
    /// Generate a reply to `query` about the ingested video.
    fn answer<'a>(&'a self, query: &'a str, context: &'a IngestionResult) -> AnswerFuture<'a>;
}
