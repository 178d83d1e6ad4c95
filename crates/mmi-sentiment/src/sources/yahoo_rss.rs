//! Yahoo Finance headline RSS collector.

use std::time::Duration;

use mmi_core::AppConfig;
use reqwest::{Client, Url};

use super::rss::parse_rss_feed;
use crate::error::SentimentError;
use crate::types::FeedEntry;

const DEFAULT_FEED_URL: &str = "https://feeds.finance.yahoo.com/rss/2.0/headline";

/// Fetches the per-ticker headline feed.
pub struct FeedClient {
    client: Client,
    feed_url: Url,
}

impl FeedClient {
    /// Creates a client pointed at the production Yahoo feed.
    ///
    /// # Errors
    ///
    /// See [`FeedClient::with_feed_url`].
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SentimentError> {
        Self::with_feed_url(DEFAULT_FEED_URL, timeout_secs, user_agent)
    }

    /// # Errors
    ///
    /// See [`FeedClient::with_feed_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Self::with_feed_url(
            &config.feed_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom feed URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::Feed`] if `feed_url` does not parse.
    pub fn with_feed_url(
        feed_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let feed_url = Url::parse(feed_url)
            .map_err(|e| SentimentError::Feed(format!("invalid feed URL '{feed_url}': {e}")))?;
        Ok(Self { client, feed_url })
    }

    /// Fetch and parse every headline in the ticker's feed.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] on network failure or non-2xx status,
    /// [`SentimentError::Feed`] if the body is not RSS, or
    /// [`SentimentError::Xml`] on malformed XML.
    pub async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<FeedEntry>, SentimentError> {
        let url = self.headline_url(ticker);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if !body.contains("<rss") {
            return Err(SentimentError::Feed(format!(
                "headline feed for {ticker} was not an RSS document"
            )));
        }
        let entries = parse_rss_feed(&body)?;
        tracing::debug!(ticker, count = entries.len(), "parsed headline feed");
        Ok(entries)
    }

    fn headline_url(&self, ticker: &str) -> Url {
        let mut url = self.feed_url.clone();
        url.query_pairs_mut()
            .append_pair("s", ticker.trim())
            .append_pair("region", "US")
            .append_pair("lang", "en-US");
        url
    }
}
