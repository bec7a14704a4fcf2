use std::sync::Arc;
use std::time::Duration;

use nd_core::{collection, Result};
use nd_store::FileStore;
use nd_summarize::{summarize_or_fallback, Summarizer};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

pub const DEFAULT_SUMMARIZE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, PartialEq, Eq)]
pub enum SummarizeOutcome {
    /// One article was summarized and promoted to active.
    Activated { link: String, title: String },
    /// No inactive article in the store; an empty cycle, not an error.
    NothingEligible,
}

/// Periodically summarizes exactly one article per tick: the oldest inactive
/// one. Working one article per interval throttles model usage and bounds a
/// bad summarization result to a single article.
pub struct SummarizeScheduler {
    store: Arc<FileStore>,
    summarizer: Arc<dyn Summarizer>,
    interval: Duration,
}

impl SummarizeScheduler {
    pub fn new(store: Arc<FileStore>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            store,
            summarizer,
            interval: DEFAULT_SUMMARIZE_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs forever: one cycle immediately, then one per interval.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(SummarizeOutcome::Activated { title, .. }) => {
                    info!("Summarized and activated: {}", title);
                }
                Ok(SummarizeOutcome::NothingEligible) => {
                    info!("no eligible article to summarize");
                }
                Err(err) => error!("summarize cycle error: {}", err),
            }
        }
    }

    /// One pick-enrich-persist round trip. The summary itself can never
    /// fail; a model error degrades to the local fallback and the article
    /// still goes active.
    pub async fn run_cycle(&self) -> Result<SummarizeOutcome> {
        let _guard = self.store.lock_write().await;
        let collection = self.store.load_or_empty().await;
        let Some(target) = collection::next_to_summarize(&collection) else {
            return Ok(SummarizeOutcome::NothingEligible);
        };
        let link = target.link.clone();
        let title = target.title.clone();
        let content = target.content.clone();

        let summary = summarize_or_fallback(self.summarizer.as_ref(), &content).await;
        let updated = collection::activate(collection, &link, summary);
        self.store.save(&updated).await?;

        Ok(SummarizeOutcome::Activated { link, title })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::{Article, ArticleStatus, Collection, Error};
    use tempfile::tempdir;

    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn summarize(&self, text: &str) -> Result<String> {
            Ok(format!("summary of {}", text))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn summarize(&self, _text: &str) -> Result<String> {
            Err(Error::Summarize("timeout".to_string()))
        }
    }

    fn inactive(link: &str, pub_date: &str, content: &str) -> Article {
        Article {
            link: link.to_string(),
            title: format!("Title for {}", link),
            content: content.to_string(),
            language: String::new(),
            category: vec![],
            pub_date: pub_date.to_string(),
            source_name: String::new(),
            source_id: String::new(),
            image_url: None,
            video_url: None,
            country: vec![],
            source_url: String::new(),
            status: ArticleStatus::Inactive,
            summary: String::new(),
        }
    }

    async fn seeded_store(dir: &tempfile::TempDir, articles: Vec<Article>) -> Arc<FileStore> {
        let store = Arc::new(FileStore::new(dir.path().join("newsdata.json")));
        store.save(&Collection { articles }).await.unwrap();
        store
    }

    #[tokio::test]
    async fn activates_exactly_one_oldest_article_per_cycle() {
        let dir = tempdir().unwrap();
        let store = seeded_store(
            &dir,
            vec![
                inactive("http://example.com/c", "2024-01-03 00:00:00", "c body"),
                inactive("http://example.com/a", "2024-01-01 00:00:00", "a body"),
                inactive("http://example.com/b", "2024-01-02 00:00:00", "b body"),
            ],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(EchoSummarizer));

        let outcome = scheduler.run_cycle().await.unwrap();
        assert_eq!(
            outcome,
            SummarizeOutcome::Activated {
                link: "http://example.com/a".to_string(),
                title: "Title for http://example.com/a".to_string(),
            }
        );

        let collection = store.load().await.unwrap();
        let active: Vec<&Article> = collection
            .articles
            .iter()
            .filter(|a| a.status == ArticleStatus::Active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].link, "http://example.com/a");
        assert_eq!(active[0].summary, "summary of a body");
    }

    #[tokio::test]
    async fn consecutive_cycles_walk_oldest_to_newest() {
        let dir = tempdir().unwrap();
        let store = seeded_store(
            &dir,
            vec![
                inactive("http://example.com/b", "2024-01-02 00:00:00", "b body"),
                inactive("http://example.com/a", "2024-01-01 00:00:00", "a body"),
            ],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(EchoSummarizer));

        let first = scheduler.run_cycle().await.unwrap();
        let second = scheduler.run_cycle().await.unwrap();
        let third = scheduler.run_cycle().await.unwrap();

        assert!(matches!(first, SummarizeOutcome::Activated { ref link, .. } if link == "http://example.com/a"));
        assert!(matches!(second, SummarizeOutcome::Activated { ref link, .. } if link == "http://example.com/b"));
        assert_eq!(third, SummarizeOutcome::NothingEligible);
    }

    #[tokio::test]
    async fn empty_store_is_an_empty_cycle() {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("newsdata.json")));
        let scheduler = SummarizeScheduler::new(store, Arc::new(EchoSummarizer));
        assert_eq!(
            scheduler.run_cycle().await.unwrap(),
            SummarizeOutcome::NothingEligible
        );
    }

    #[tokio::test]
    async fn model_failure_still_activates_with_fallback() {
        let dir = tempdir().unwrap();
        let store = seeded_store(
            &dir,
            vec![inactive("http://example.com/a", "2024-01-01 00:00:00", "a b c")],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(FailingSummarizer));
        scheduler.run_cycle().await.unwrap();

        let collection = store.load().await.unwrap();
        assert_eq!(collection.articles[0].status, ArticleStatus::Active);
        assert_eq!(collection.articles[0].summary, "[Fallback] a b c...");
    }

    #[tokio::test]
    async fn empty_content_activates_with_empty_summary() {
        let dir = tempdir().unwrap();
        let store = seeded_store(
            &dir,
            vec![inactive("http://example.com/a", "2024-01-01 00:00:00", "")],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(FailingSummarizer));
        scheduler.run_cycle().await.unwrap();

        let collection = store.load().await.unwrap();
        assert_eq!(collection.articles[0].status, ArticleStatus::Active);
        assert!(collection.articles[0].summary.is_empty());
    }

    #[tokio::test]
    async fn active_articles_are_never_touched_again() {
        let dir = tempdir().unwrap();
        let mut already = inactive("http://example.com/a", "2024-01-01 00:00:00", "a body");
        already.status = ArticleStatus::Active;
        already.summary = "original".to_string();
        let store = seeded_store(
            &dir,
            vec![
                already,
                inactive("http://example.com/b", "2024-01-02 00:00:00", "b body"),
            ],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(EchoSummarizer));
        scheduler.run_cycle().await.unwrap();

        let collection = store.load().await.unwrap();
        let untouched = collection
            .articles
            .iter()
            .find(|a| a.link == "http://example.com/a")
            .unwrap();
        assert_eq!(untouched.summary, "original");
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_ticks_immediately_then_on_interval() {
        let dir = tempdir().unwrap();
        let store = seeded_store(
            &dir,
            vec![
                inactive("http://example.com/a", "2024-01-01 00:00:00", "a body"),
                inactive("http://example.com/b", "2024-01-02 00:00:00", "b body"),
            ],
        )
        .await;
        let scheduler = SummarizeScheduler::new(store.clone(), Arc::new(EchoSummarizer))
            .with_interval(Duration::from_secs(60));
        let handle = tokio::spawn(scheduler.run());

        let first = wait_for_active_count(&store, 1).await;
        assert!(first >= 1, "first tick should run without waiting an interval");

        tokio::time::sleep(Duration::from_secs(61)).await;
        let second = wait_for_active_count(&store, 2).await;
        assert_eq!(second, 2);

        handle.abort();
    }

    async fn wait_for_active_count(store: &Arc<FileStore>, want: usize) -> usize {
        for _ in 0..1000 {
            let collection = store.load_or_empty().await;
            let active = collection
                .articles
                .iter()
                .filter(|a| a.status == ArticleStatus::Active)
                .count();
            if active >= want {
                return active;
            }
            tokio::task::yield_now().await;
        }
        let collection = store.load_or_empty().await;
        collection
            .articles
            .iter()
            .filter(|a| a.status == ArticleStatus::Active)
            .count()
    }
}
