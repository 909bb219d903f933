//! Market-sentiment adapter.
//!
//! Fetches crypto news, scores each relevant headline with the FinBERT
//! model on the Hugging Face inference API, and reports the majority
//! label. Items that fail to classify are logged and dropped from the
//! vote; when nothing classifies the label is "unknown".

pub mod news;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::Result;
use crate::port::outbound::SentimentSource;

use news::{NewsFetcher, NewsItem};

const FINBERT_URL: &str = "https://api-inference.huggingface.co/models/ProsusAI/finbert";

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// The inference API nests predictions one level deeper for some models.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FinBertResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

impl FinBertResponse {
    fn top_label(self) -> Option<String> {
        let predictions = match self {
            Self::Nested(mut nested) => {
                if nested.is_empty() {
                    return None;
                }
                nested.remove(0)
            }
            Self::Flat(flat) => flat,
        };
        predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|p| p.label.to_lowercase())
    }
}

/// News-driven sentiment source backed by CryptoPanic and FinBERT.
pub struct NewsSentiment {
    fetcher: NewsFetcher,
    http: reqwest::Client,
    hf_token: String,
}

impl NewsSentiment {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        cryptopanic_token: impl Into<String>,
        hf_token: impl Into<String>,
    ) -> Self {
        Self {
            fetcher: NewsFetcher::new(http.clone(), cryptopanic_token),
            http,
            hf_token: hf_token.into(),
        }
    }

    async fn classify(&self, text: &str) -> Option<String> {
        let result = self
            .http
            .post(FINBERT_URL)
            .bearer_auth(&self.hf_token)
            .json(&json!({ "inputs": text }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "finbert request failed");
                return None;
            }
        };

        match response.json::<FinBertResponse>().await {
            Ok(parsed) => Some(parsed.top_label().unwrap_or_else(|| "unknown".to_string())),
            Err(err) => {
                warn!(error = %err, "finbert response did not parse");
                None
            }
        }
    }

    /// Majority vote over the labels that classified. Failed items carry
    /// no label and do not vote; an empty ballot is "unknown".
    fn majority(labels: &[Option<String>]) -> String {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for label in labels.iter().flatten() {
            *counts.entry(label.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(label, _)| label.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[async_trait]
impl SentimentSource for NewsSentiment {
    async fn market_sentiment(&self) -> Result<String> {
        let news = self.fetcher.fetch().await?;
        let relevant: Vec<NewsItem> = news.into_iter().filter(NewsItem::mentions_aptos).collect();

        let mut labels = Vec::with_capacity(relevant.len());
        for item in &relevant {
            let text = format!("{} {}", item.title, item.summary);
            labels.push(self.classify(&text).await);
        }

        Ok(Self::majority(&labels))
    }
}
