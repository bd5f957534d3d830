//! Error taxonomy for the aggregation pipeline
//!
//! Fatal conditions (transport, decode, price parse, degenerate weights)
//! abort the whole request; a missing metadata entry is the only non-fatal
//! case and is handled inline by the aggregator, never surfaced here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection-level failure talking to an upstream source.
    #[error("request to {upstream} failed: {cause}")]
    Transport {
        upstream: &'static str,
        #[source]
        cause: reqwest::Error,
    },

    /// Upstream answered with a non-2xx status.
    #[error("{upstream} returned HTTP {status}")]
    UpstreamStatus { upstream: &'static str, status: u16 },

    /// Upstream body did not match the expected JSON shape.
    #[error("failed to decode {upstream} response: {cause}")]
    Decode {
        upstream: &'static str,
        #[source]
        cause: reqwest::Error,
    },

    /// A qualifying ticker carried a price string that is not a number.
    #[error("failed to parse price {raw:?} for {symbol}")]
    PriceParse {
        symbol: String,
        raw: String,
        #[source]
        cause: std::num::ParseFloatError,
    },

    /// A qualifying ticker quoted a price of exactly zero; its gain would
    /// be infinite.
    #[error("price for {symbol} is zero")]
    ZeroPrice { symbol: String },

    /// Non-empty asset set whose gains sum to zero; probabilities cannot
    /// be normalized.
    #[error("degenerate distribution: gains sum to zero")]
    DegenerateDistribution,

    /// The sampler was asked for more distinct assets than exist.
    #[error("not enough assets to sample: have {have}, want {want}")]
    NotEnoughAssets { have: usize, want: usize },
}
