use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use nd_core::Result;
use nd_feed::{FeedSource, FetchParams, NewsDataFeed};
use nd_pipeline::{IngestScheduler, SummarizeScheduler};
use nd_store::FileStore;
use nd_summarize::{DummySummarizer, OpenAiSummarizer, Summarizer};
use nd_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "News ingestion and summarization service", long_about = None)]
struct Cli {
    /// Port for the HTTP API
    #[arg(long, env = "PORT", default_value_t = 3002)]
    port: u16,

    /// Path of the persisted news document
    #[arg(long, env = "NEWSDATA_FILE", default_value = "newsdata.json")]
    data_file: PathBuf,

    /// NewsData.io api key
    #[arg(long, env = "NEWSDATA_API_KEY")]
    newsdata_api_key: String,

    /// OpenAI api key; without one the offline summarizer is used
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,

    /// Language code requested from the upstream feed
    #[arg(long, env = "NEWS_LANGUAGE", default_value = "te")]
    language: String,

    /// Minutes between fetch cycles
    #[arg(long, default_value_t = 10)]
    fetch_interval_mins: u64,

    /// Seconds between summarize cycles
    #[arg(long, default_value_t = 60)]
    summarize_interval_secs: u64,

    /// Force the offline summarizer even when an OpenAI key is set
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = Arc::new(FileStore::new(&cli.data_file));
    info!("💾 Store backed by {}", store.path().display());

    let feed: Arc<dyn FeedSource> = Arc::new(NewsDataFeed::new(&cli.newsdata_api_key)?);
    let summarizer: Arc<dyn Summarizer> = match &cli.openai_api_key {
        Some(key) if !cli.offline => Arc::new(OpenAiSummarizer::new(key)?),
        _ => Arc::new(DummySummarizer),
    };
    info!("🧠 Summarizer initialized ({})", summarizer.name());

    let ingest = IngestScheduler::new(store.clone(), feed)
        .with_params(FetchParams::profile(&cli.language))
        .with_interval(Duration::from_secs(cli.fetch_interval_mins * 60));
    let summarize = SummarizeScheduler::new(store.clone(), summarizer)
        .with_interval(Duration::from_secs(cli.summarize_interval_secs));
    tokio::spawn(ingest.run());
    tokio::spawn(summarize.run());

    let app = nd_web::create_app(AppState { store }).await;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
    info!("📰 newsdesk API listening on http://localhost:{}", cli.port);
    axum::serve(listener, app).await?;

    Ok(())
}
