use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an article: created `inactive`, promoted to `active` exactly
/// once when its summary has been attached. There is no way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Inactive,
    Active,
}

/// One ingested news item. `link` is the identity key: no two stored
/// articles may share one. Everything except `pub_date`, `status` and
/// `summary` is passed through from upstream untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub summary: String,
}

impl Article {
    /// `pub_date` parsed for ordering. Upstream emits `YYYY-MM-DD HH:MM:SS`
    /// in UTC; RFC 3339 is accepted as a fallback. An unparseable date sorts
    /// as the earliest possible instant so a bad row never shadows a real one.
    pub fn published_at(&self) -> DateTime<Utc> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&self.pub_date, "%Y-%m-%d %H:%M:%S") {
            return DateTime::from_naive_utc_and_offset(naive, Utc);
        }
        DateTime::parse_from_rfc3339(&self.pub_date)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// The persisted aggregate: the full deduplicated set of articles, stored as
/// a single `{ "articles": [...] }` document. Owned exclusively by the store;
/// every other component works on a value copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
