//! Summarization boundary. External models implement [`Summarizer`];
//! [`summarize_or_fallback`] is the terminal error boundary around them: the
//! caller always gets a string, never an error.

use tracing::warn;

pub mod models;

pub use models::{DummySummarizer, OpenAiSummarizer, Summarizer};

pub const FALLBACK_PREFIX: &str = "[Fallback] ";
pub const FALLBACK_WORDS: usize = 30;

/// Deterministic local summary used when the external model fails: the fixed
/// prefix, the first 30 whitespace-separated words, and an ellipsis marker.
pub fn fallback_summary(text: &str) -> String {
    let head: Vec<&str> = text.split_whitespace().take(FALLBACK_WORDS).collect();
    format!("{}{}...", FALLBACK_PREFIX, head.join(" "))
}

/// Summarizes `text`, absorbing every model failure into the local fallback.
/// Empty text short-circuits to an empty summary without touching the model.
pub async fn summarize_or_fallback(summarizer: &dyn Summarizer, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match summarizer.summarize(text).await {
        Ok(summary) => summary.trim().to_string(),
        Err(err) => {
            warn!("{} summarizer failed, using local fallback: {}", summarizer.name(), err);
            fallback_summary(text)
        }
    }
}
