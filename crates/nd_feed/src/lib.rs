//! Upstream feed boundary: the `FeedSource` trait, the query parameter
//! profile sent on every fetch, and the raw wire shape of a fetch response.

use async_trait::async_trait;
use nd_core::{Article, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

pub mod newsdata;

pub use newsdata::NewsDataFeed;

pub const DEFAULT_LANGUAGE: &str = "te";

/// Upstream reports this in the response envelope when the call worked.
pub const STATUS_SUCCESS: &str = "success";

/// Query parameters for a latest-news fetch. `profile` builds the fixed
/// defaults used by every scheduled cycle; `set` lays caller overrides on
/// top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    params: BTreeMap<String, String>,
}

impl FetchParams {
    pub fn profile(language: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("timezone".to_string(), "asia/kolkata".to_string());
        params.insert("full_content".to_string(), "1".to_string());
        params.insert("image".to_string(), "1".to_string());
        params.insert("timeframe".to_string(), "30m".to_string());
        params.insert("removeduplicate".to_string(), "1".to_string());
        params.insert("sort".to_string(), "pubdateasc".to_string());
        params.insert("excludefield".to_string(), "duplicate".to_string());
        params.insert("size".to_string(), "50".to_string());
        params.insert("language".to_string(), language.to_string());
        Self { params }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn as_query(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl Default for FetchParams {
    fn default() -> Self {
        Self::profile(DEFAULT_LANGUAGE)
    }
}

/// Response envelope of the latest-news endpoint. Anything other than
/// `status == "success"` means the cycle must leave the store alone.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub status: String,
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    #[serde(rename = "nextPage", default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub results: Vec<RawArticle>,
}

impl FeedResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// One record as upstream delivers it. Every field may be absent or null, so
/// they are all optional here and normalized in `into_article`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    pub link: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub category: Option<Vec<String>>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub source_name: Option<String>,
    pub source_id: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub country: Option<Vec<String>>,
    pub source_url: Option<String>,
}

impl RawArticle {
    /// Shapes an upstream record into a stored article: `inactive`, no
    /// summary yet. A record without a link has no identity and is dropped.
    pub fn into_article(self) -> Option<Article> {
        let link = self.link?;
        Some(Article {
            link,
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            pub_date: self.pub_date.unwrap_or_default(),
            source_name: self.source_name.unwrap_or_default(),
            source_id: self.source_id.unwrap_or_default(),
            image_url: self.image_url,
            video_url: self.video_url,
            country: self.country.unwrap_or_default(),
            source_url: self.source_url.unwrap_or_default(),
            status: nd_core::ArticleStatus::Inactive,
            summary: String::new(),
        })
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetches the latest batch of articles from upstream.
    async fn latest(&self, params: &FetchParams) -> Result<FeedResponse>;
}
