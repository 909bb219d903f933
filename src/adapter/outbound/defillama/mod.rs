//! DefiLlama yields API adapter.

pub mod dto;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{Chain, EnrichedPool, PoolYield};
use crate::error::Result;
use crate::port::outbound::YieldSource;

use dto::{Envelope, RawEnrichedPool, RawPoolYield};

const DEFAULT_BASE_URL: &str = "https://yields.llama.fi";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the DefiLlama yields endpoints.
///
/// All fetches degrade to empty results on failure; the wrapped client
/// enforces a bounded request timeout so a stalled upstream cannot wedge
/// a collection cycle.
pub struct DefiLlamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl DefiLlamaClient {
    /// Build a client against the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Build a client against an alternate base URL. Used by tests that
    /// point at a local stub server.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn get_pools(&self) -> Result<Vec<RawPoolYield>> {
        let url = format!("{}/pools", self.base_url);
        let envelope: Envelope<RawPoolYield> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data)
    }

    async fn get_enriched(&self, pool_id: &str) -> Result<Vec<RawEnrichedPool>> {
        let url = format!("{}/poolsEnriched", self.base_url);
        let envelope: Envelope<RawEnrichedPool> = self
            .http
            .get(&url)
            .query(&[("pool", pool_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl YieldSource for DefiLlamaClient {
    async fn fetch_pool_yields(&self, chains: &[Chain]) -> Vec<PoolYield> {
        let raw = match self.get_pools().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to fetch pool yields from defillama");
                return Vec::new();
            }
        };

        let total = raw.len();
        let yields: Vec<PoolYield> = raw
            .into_iter()
            .map(dto::normalize)
            .filter(|y| chains.contains(&y.chain))
            .collect();
        debug!(total, kept = yields.len(), "fetched pool yields");
        yields
    }

    async fn fetch_enriched_pool(&self, pool_id: &str) -> Option<EnrichedPool> {
        match self.get_enriched(pool_id).await {
            Ok(mut raw) => {
                if raw.is_empty() {
                    debug!(pool_id, "no enriched record for pool");
                    return None;
                }
                Some(raw.remove(0).into())
            }
            Err(err) => {
                warn!(pool_id, error = %err, "failed to fetch enriched pool");
                None
            }
        }
    }
}
