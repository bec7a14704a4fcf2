use std::fmt;

use async_trait::async_trait;
use nd_core::Result;

use super::Summarizer;

/// Offline summarizer for tests and keyless runs: first 20 words of the text.
pub struct DummySummarizer;

impl fmt::Debug for DummySummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummySummarizer").finish()
    }
}

#[async_trait]
impl Summarizer for DummySummarizer {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }
}
