//! Crypto news fetching for the sentiment signal.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

const CRYPTOPANIC_URL: &str = "https://cryptopanic.com/api/v1/posts/";

/// One fetched news item, reduced to the fields the classifier consumes.
#[derive(Debug, Clone)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
}

impl NewsItem {
    /// Whether the item mentions the Aptos ecosystem.
    #[must_use]
    pub fn mentions_aptos(&self) -> bool {
        let haystack = format!("{} {}", self.title, self.summary).to_lowercase();
        haystack.contains("aptos") || haystack.contains("apt ")
    }
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    results: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    domain: Option<String>,
}

/// CryptoPanic news client.
pub struct NewsFetcher {
    http: reqwest::Client,
    auth_token: String,
}

impl NewsFetcher {
    #[must_use]
    pub fn new(http: reqwest::Client, auth_token: impl Into<String>) -> Self {
        Self {
            http,
            auth_token: auth_token.into(),
        }
    }

    /// Fetch the latest English-language posts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed payload.
    pub async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let response: PostsResponse = self
            .http
            .get(CRYPTOPANIC_URL)
            .query(&[
                ("auth_token", self.auth_token.as_str()),
                ("public", "true"),
                ("regions", "en"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let items: Vec<NewsItem> = response
            .results
            .into_iter()
            .map(|post| NewsItem {
                title: post.title,
                summary: post.domain.unwrap_or_default(),
            })
            .collect();
        debug!(count = items.len(), "fetched news items");
        Ok(items)
    }
}
