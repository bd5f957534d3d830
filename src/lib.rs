//! Coinbox Library
//!
//! Gain-weighted probability boxes over spot ticker data

pub mod aggregator;
pub mod config;
pub mod error;
pub mod partition;
pub mod sampler;
pub mod server;
pub mod sources;
pub mod types;
