use async_trait::async_trait;
use nd_core::Result;

pub mod dummy;
pub mod openai;

pub use dummy::DummySummarizer;
pub use openai::OpenAiSummarizer;

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a bounded-length human-readable summary of `text`.
    async fn summarize(&self, text: &str) -> Result<String>;
}
