use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nd_core::Result;
use reqwest::Client;

use crate::{FeedResponse, FeedSource, FetchParams};

pub const BASE_URL: &str = "https://newsdata.io/api/1/latest";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// NewsData.io latest-news client. The api key rides along as a query
/// parameter on every request, as the upstream API expects.
pub struct NewsDataFeed {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsDataFeed {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for NewsDataFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsDataFeed")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl FeedSource for NewsDataFeed {
    fn name(&self) -> &str {
        "NewsData.io"
    }

    async fn latest(&self, params: &FetchParams) -> Result<FeedResponse> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(&params.as_query())
            .send()
            .await?
            .error_for_status()?
            .json::<FeedResponse>()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let feed = NewsDataFeed::new("secret-key").unwrap();
        let rendered = format!("{:?}", feed);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn base_url_can_be_overridden() {
        let feed = NewsDataFeed::new("k")
            .unwrap()
            .with_base_url("http://localhost:9999/api/1/latest");
        assert!(format!("{:?}", feed).contains("localhost:9999"));
    }
}
