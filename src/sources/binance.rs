//! Binance REST client for the spot ticker list
//!
//! One unauthenticated GET against `/api/v3/ticker/price` returns every
//! tradable pair with its price as a string.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FeedError;
use crate::sources::PriceSource;
use crate::types::RawPrice;

const BINANCE_BASE_URL: &str = "https://api.binance.com";
const TICKER_PATH: &str = "/api/v3/ticker/price";

#[derive(Debug, Clone)]
pub struct BinanceSource {
    client: Client,
    base_url: String,
}

impl BinanceSource {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_BASE_URL)
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for BinanceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    fn name(&self) -> &'static str {
        "Binance"
    }

    async fn fetch_prices(&self) -> Result<Vec<RawPrice>, FeedError> {
        let url = format!("{}{}", self.base_url, TICKER_PATH);
        tracing::debug!(source = %self.name(), url = %url, "Fetching ticker list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|cause| FeedError::Transport {
                upstream: "Binance",
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                upstream: "Binance",
                status: status.as_u16(),
            });
        }

        let prices: Vec<RawPrice> =
            response.json().await.map_err(|cause| FeedError::Decode {
                upstream: "Binance",
                cause,
            })?;

        tracing::info!(source = %self.name(), count = prices.len(), "Ticker list fetched");
        Ok(prices)
    }
}
