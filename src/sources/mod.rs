//! Upstream data sources
//!
//! Two collaborators feed the aggregator: a price source (full spot ticker
//! list) and a metadata source (display name + icon per base symbol).
//! Concrete providers live behind these traits so the pipeline never cares
//! which vendor supplied the data.

mod binance;
mod coinapi;
mod coingecko;

pub use binance::BinanceSource;
pub use coinapi::CoinApiSource;
pub use coingecko::CoinGeckoSource;

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::FeedError;
use crate::types::{AssetMetadata, RawPrice};

/// Provider of the raw ticker list, in the provider's response order.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_prices(&self) -> Result<Vec<RawPrice>, FeedError>;
}

/// Provider of asset display metadata, keyed by uppercased base symbol.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_metadata(&self) -> Result<HashMap<String, AssetMetadata>, FeedError>;
}
