//! CoinGecko metadata adapter
//!
//! Single bulk call to `/api/v3/coins/markets` gives name and image per
//! coin; no API key required.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FeedError;
use crate::sources::MetadataSource;
use crate::types::AssetMetadata;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
const MARKETS_PATH: &str = "/api/v3/coins/markets?vs_currency=usd";

#[derive(Debug, Clone, Deserialize)]
struct GeckoCoin {
    id: String,
    symbol: String,
    name: String,
    image: String,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoSource {
    client: Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE_URL)
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

impl Default for CoinGeckoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "CoinGecko"
    }

    async fn fetch_metadata(&self) -> Result<HashMap<String, AssetMetadata>, FeedError> {
        let url = format!("{}{}", self.base_url, MARKETS_PATH);
        tracing::debug!(source = %self.name(), "Fetching coin markets");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|cause| FeedError::Transport {
                upstream: "CoinGecko",
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                upstream: "CoinGecko",
                status: status.as_u16(),
            });
        }

        let coins: Vec<GeckoCoin> =
            response.json().await.map_err(|cause| FeedError::Decode {
                upstream: "CoinGecko",
                cause,
            })?;

        let metadata: HashMap<String, AssetMetadata> = coins
            .into_iter()
            .map(|coin| {
                let base_symbol = coin.symbol.to_uppercase();
                (
                    base_symbol.clone(),
                    AssetMetadata {
                        base_symbol,
                        name: coin.name,
                        icon_url: coin.image,
                        external_id: Some(coin.id),
                    },
                )
            })
            .collect();

        tracing::info!(source = %self.name(), count = metadata.len(), "Metadata fetched");
        Ok(metadata)
    }
}
