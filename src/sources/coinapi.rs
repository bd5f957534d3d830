//! CoinAPI metadata adapter
//!
//! CoinAPI splits display metadata over two feeds: `/v1/assets/icons/{size}`
//! carries icon URLs and `/v1/assets` carries names. Both are fetched
//! sequentially and joined by uppercased asset id; only ids present in both
//! feeds survive the join. The API key is injected at construction and sent
//! as the `X-CoinAPI-Key` header, never read from the environment here.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FeedError;
use crate::sources::MetadataSource;
use crate::types::AssetMetadata;

const COINAPI_BASE_URL: &str = "https://rest.coinapi.io";
const API_KEY_HEADER: &str = "X-CoinAPI-Key";
/// Icon size variant of the icons feed, in pixels.
const ICON_SIZE: u32 = 55;

#[derive(Debug, Clone, Deserialize)]
struct IconRecord {
    asset_id: String,
    url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AssetRecord {
    asset_id: String,
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoinApiSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CoinApiSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(COINAPI_BASE_URL, api_key)
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|cause| FeedError::Transport {
                upstream: "CoinAPI",
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                upstream: "CoinAPI",
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|cause| FeedError::Decode {
            upstream: "CoinAPI",
            cause,
        })
    }
}

#[async_trait]
impl MetadataSource for CoinApiSource {
    fn name(&self) -> &'static str {
        "CoinAPI"
    }

    async fn fetch_metadata(&self) -> Result<HashMap<String, AssetMetadata>, FeedError> {
        tracing::debug!(source = %self.name(), "Fetching icon and asset feeds");

        let icons: Vec<IconRecord> = self
            .fetch_json(&format!("/v1/assets/icons/{ICON_SIZE}"))
            .await?;
        let assets: Vec<AssetRecord> = self.fetch_json("/v1/assets").await?;

        let names: HashMap<String, String> = assets
            .into_iter()
            .filter_map(|record| {
                let name = record.name?;
                Some((record.asset_id.to_uppercase(), name))
            })
            .collect();

        let mut metadata = HashMap::new();
        for icon in icons {
            let asset_id = icon.asset_id.to_uppercase();
            if let Some(name) = names.get(&asset_id) {
                metadata.insert(
                    asset_id.clone(),
                    AssetMetadata {
                        base_symbol: asset_id.clone(),
                        name: name.clone(),
                        icon_url: icon.url,
                        external_id: Some(asset_id),
                    },
                );
            }
        }

        tracing::info!(source = %self.name(), count = metadata.len(), "Metadata joined");
        Ok(metadata)
    }
}
