use std::sync::Arc;
use std::time::Duration;

use nd_core::{collection, Article, Error, Result};
use nd_feed::{FeedSource, FetchParams};
use nd_store::FileStore;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// What one fetch-and-merge cycle produced.
#[derive(Debug)]
pub struct IngestOutcome {
    /// Articles delivered by upstream this cycle, before dedup.
    pub fetched: usize,
    /// Size of the merged collection that was persisted.
    pub stored: usize,
    pub total_results: u64,
    pub next_page: Option<String>,
}

/// Periodically fetches the latest batch and merges it into the store.
/// A failed fetch aborts the cycle without touching the document; the next
/// tick starts over from freshly loaded state.
pub struct IngestScheduler {
    store: Arc<FileStore>,
    feed: Arc<dyn FeedSource>,
    params: FetchParams,
    interval: Duration,
}

impl IngestScheduler {
    pub fn new(store: Arc<FileStore>, feed: Arc<dyn FeedSource>) -> Self {
        Self {
            store,
            feed,
            params: FetchParams::default(),
            interval: DEFAULT_FETCH_INTERVAL,
        }
    }

    pub fn with_params(mut self, params: FetchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs forever: one cycle immediately, then one per interval. A cycle
    /// that overruns its interval delays the next tick rather than stacking.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut context = "startup";
        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(outcome) => {
                    info!(
                        "{} fetch: {} new articles fetched, {} stored",
                        context, outcome.fetched, outcome.stored
                    );
                }
                Err(err) => error!("{} fetch error: {}", context, err),
            }
            context = "scheduled";
        }
    }

    /// One fetch-merge-persist round trip.
    pub async fn run_cycle(&self) -> Result<IngestOutcome> {
        let response = self.feed.latest(&self.params).await?;
        if !response.is_success() {
            return Err(Error::Fetch(format!(
                "upstream reported status {:?}",
                response.status
            )));
        }

        let total_results = response.total_results;
        let next_page = response.next_page;
        let incoming: Vec<Article> = response
            .results
            .into_iter()
            .filter_map(|raw| raw.into_article())
            .collect();
        let fetched = incoming.len();

        let _guard = self.store.lock_write().await;
        let existing = self.store.load_or_empty().await;
        let merged = collection::merge(incoming, existing);
        self.store.save(&merged).await?;

        Ok(IngestOutcome {
            fetched,
            stored: merged.len(),
            total_results,
            next_page,
        })
    }
}
