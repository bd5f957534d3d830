//! Aggregator - joins raw ticker prices with asset metadata
//!
//! Filters tickers to the configured quote suffix, derives the gain weight
//! (1 / price) per pair, and normalizes gains into a probability
//! distribution over the full joined set.

use std::collections::HashMap;

use crate::error::FeedError;
use crate::types::{AssetMetadata, CoinAsset, RawPrice};

/// Tolerance for the Σ probability ≈ 1.0 diagnostic check.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-4;

/// Joins price and metadata feeds into a normalized asset set.
#[derive(Debug, Clone)]
pub struct Aggregator {
    quote_suffix: String,
}

impl Aggregator {
    pub fn new(quote_suffix: impl Into<String>) -> Self {
        Self {
            quote_suffix: quote_suffix.into(),
        }
    }

    /// Build the joined asset list from one price snapshot and one
    /// metadata snapshot.
    ///
    /// Tickers without the quote suffix are ignored. Tickers whose base
    /// symbol has no metadata entry are dropped silently. A malformed or
    /// zero price string on any qualifying ticker aborts the whole build.
    ///
    /// Output order follows the price feed's response order; the metadata
    /// map is only ever probed by key, so its iteration order can never
    /// leak into the result. Duplicate base symbols across pairs are kept
    /// as separate assets.
    pub fn build(
        &self,
        raw_prices: &[RawPrice],
        metadata: &HashMap<String, AssetMetadata>,
    ) -> Result<Vec<CoinAsset>, FeedError> {
        let qualifying = raw_prices
            .iter()
            .filter(|raw| raw.symbol.ends_with(&self.quote_suffix))
            .count();
        // Ratio is fixed per snapshot, independent of metadata coverage.
        let ratio = if qualifying > 0 {
            1.0 / qualifying as f64
        } else {
            0.0
        };

        let mut assets = Vec::new();
        for raw in raw_prices {
            if !raw.symbol.ends_with(&self.quote_suffix) {
                continue;
            }

            let price: f64 = raw.price.parse().map_err(|cause| FeedError::PriceParse {
                symbol: raw.symbol.clone(),
                raw: raw.price.clone(),
                cause,
            })?;
            if price == 0.0 {
                return Err(FeedError::ZeroPrice {
                    symbol: raw.symbol.clone(),
                });
            }

            let base_symbol = raw
                .symbol
                .strip_suffix(&self.quote_suffix)
                .unwrap_or(&raw.symbol);
            let Some(meta) = metadata.get(base_symbol) else {
                tracing::debug!(symbol = %raw.symbol, "No metadata for base symbol, skipping");
                continue;
            };

            let gain = 1.0 / price;
            assets.push(CoinAsset {
                icon: meta.icon_url.clone(),
                name: meta.name.clone(),
                pair_symbol: raw.symbol.clone(),
                ratio,
                gain,
                probability: gain,
            });
        }

        normalize(&mut assets)?;
        Ok(assets)
    }
}

/// Rescale probabilities so they sum to 1.0 over `assets`.
///
/// An empty set is a no-op. A non-empty set whose gains sum to zero has no
/// meaningful distribution and is rejected.
pub fn normalize(assets: &mut [CoinAsset]) -> Result<(), FeedError> {
    if assets.is_empty() {
        return Ok(());
    }

    let total: f64 = assets.iter().map(|a| a.gain).sum();
    if total <= 0.0 {
        return Err(FeedError::DegenerateDistribution);
    }

    for asset in assets.iter_mut() {
        asset.probability = asset.gain / total;
    }
    Ok(())
}

/// Diagnostic check: do the probabilities sum to approximately 1.0?
///
/// Reporting only; callers must never gate output on this.
pub fn is_normalized(assets: &[CoinAsset]) -> bool {
    let total: f64 = assets.iter().map(|a| a.probability).sum();
    (total - 1.0).abs() < NORMALIZATION_TOLERANCE
}
