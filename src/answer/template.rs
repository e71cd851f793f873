//! Templated stand-in answer provider.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::models::video::IngestionResult;

use super::{AnswerFuture, AnswerProvider};

/// Stand-in provider that fabricates replies from a fixed template set.
///
/// Replies cite plausible video timestamps and echo the user's query back,
/// after an artificial delay that approximates real answer latency.
#[derive(Debug, Clone)]
pub struct TemplateAnswerProvider {
    delay: Duration,
}

impl TemplateAnswerProvider {
    /// Create a provider that waits `delay` before each reply.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn render(template_index: usize, query: &str) -> String {
        match template_index {
            0 => format!(
                "Based on the video, the speaker discusses this topic around the 4:20 \
                 mark. They mention that \"{query}\" is important because..."
            ),
            1 => format!(
                "The video covers this in detail! At 8:15, the presenter explains that \
                 {} is a key concept that...",
                query.to_lowercase()
            ),
            2 => format!(
                "Great question! Around 12:30 in the video, they provide examples of \
                 {} including...",
                query.to_lowercase()
            ),
            _ => format!(
                "I found relevant information about this! At 6:45, the speaker talks \
                 about how {} relates to...",
                query.to_lowercase()
            ),
        }
    }
}

impl AnswerProvider for TemplateAnswerProvider {
    fn answer<'a>(&'a self, query: &'a str, _context: &'a IngestionResult) -> AnswerFuture<'a> {
        // thread_rng is not Send, so pick the template before awaiting.
        let template_index = rand::thread_rng().gen_range(0..4);
        Box::pin(async move {
            sleep(self.delay).await;
            Ok(Self::render(template_index, query))
        })
    }
}
