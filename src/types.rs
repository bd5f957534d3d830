//! Core types used throughout Coinbox
//!
//! Defines the raw upstream records and the joined asset entity.

use serde::{Deserialize, Serialize};

/// Quote currency suffix used to filter relevant trading pairs.
pub const DEFAULT_QUOTE_SUFFIX: &str = "USDT";

/// Number of assets drawn by the random sampler.
pub const SAMPLE_SIZE: usize = 10;

/// Raw ticker entry as returned by the price source.
///
/// Prices arrive as strings and are only parsed during aggregation so that
/// a malformed entry aborts the whole build instead of being silently
/// rounded or skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrice {
    pub symbol: String,
    pub price: String,
}

/// Display metadata for one asset, keyed by uppercased base symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Uppercased base symbol, e.g. "BTC".
    pub base_symbol: String,
    /// Human-readable display name, e.g. "Bitcoin".
    pub name: String,
    /// Icon image URL.
    pub icon_url: String,
    /// Provider-specific asset identifier, if the provider has one.
    pub external_id: Option<String>,
}

/// The joined asset entity produced by the aggregator.
///
/// `gain` is the reciprocal of the quoted price and acts as an unnormalized
/// weight; `probability` starts equal to `gain` and is normalized over
/// whichever set the asset currently belongs to (full list, sample, or box).
/// `ratio` is 1/(count of quote-matching raw entries), carried as a
/// diagnostic field only; nothing downstream consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinAsset {
    pub icon: String,
    pub name: String,
    pub pair_symbol: String,
    pub ratio: f64,
    pub gain: f64,
    pub probability: f64,
}
