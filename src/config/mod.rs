//! Configuration management for Coinbox
//!
//! Loads defaults + optional YAML files + environment variables via .env.
//! The CoinAPI key is the one secret; it is read here once (COINAPI_KEY)
//! and handed to the adapter explicitly, never read ad hoc.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::sources::{CoinApiSource, CoinGeckoSource, MetadataSource};
use crate::types::DEFAULT_QUOTE_SUFFIX;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub prices: PricesConfig,
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listening port
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricesConfig {
    /// Quote currency suffix used to filter trading pairs
    pub quote_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    /// Metadata provider: "coingecko" or "coinapi"
    pub provider: String,
    /// CoinAPI key, required only when provider = "coinapi"
    pub coinapi_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from defaults, files and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            // Price feed defaults
            .set_default("prices.quote_suffix", DEFAULT_QUOTE_SUFFIX)?
            // Metadata defaults
            .set_default("metadata.provider", "coingecko")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (COINBOX_*)
            .add_source(Environment::with_prefix("COINBOX").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // COINAPI_KEY is the historical variable name; honor it when the
        // prefixed form was not set.
        if app_config.metadata.coinapi_key.is_none() {
            app_config.metadata.coinapi_key = std::env::var("COINAPI_KEY").ok();
        }

        Ok(app_config)
    }

    /// Build the configured metadata source adapter.
    pub fn metadata_source(&self) -> Result<Box<dyn MetadataSource>> {
        match self.metadata.provider.as_str() {
            "coingecko" => Ok(Box::new(CoinGeckoSource::new())),
            "coinapi" => {
                let Some(key) = self.metadata.coinapi_key.clone() else {
                    bail!("CoinAPI selected but no API key configured (set COINAPI_KEY)");
                };
                Ok(Box::new(CoinApiSource::new(key)))
            }
            other => bail!("Unknown metadata provider: {other}"),
        }
    }

    /// Generate a digest of the config (without secrets) for logging
    pub fn digest(&self) -> String {
        format!(
            "listen={}:{} quote_suffix={} metadata={}",
            self.server.host, self.server.port, self.prices.quote_suffix, self.metadata.provider,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8082,
            },
            prices: PricesConfig {
                quote_suffix: DEFAULT_QUOTE_SUFFIX.to_string(),
            },
            metadata: MetadataConfig {
                provider: "coingecko".to_string(),
                coinapi_key: None,
            },
        }
    }

    #[test]
    fn test_coingecko_provider_needs_no_key() {
        let config = base_config();
        assert!(config.metadata_source().is_ok());
    }

    #[test]
    fn test_coinapi_provider_requires_key() {
        let mut config = base_config();
        config.metadata.provider = "coinapi".to_string();
        assert!(config.metadata_source().is_err());

        config.metadata.coinapi_key = Some("k".to_string());
        assert!(config.metadata_source().is_ok());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let mut config = base_config();
        config.metadata.provider = "oracle-of-delphi".to_string();
        assert!(config.metadata_source().is_err());
    }

    #[test]
    fn test_digest_omits_secrets() {
        let mut config = base_config();
        config.metadata.coinapi_key = Some("super-secret".to_string());
        assert!(!config.digest().contains("super-secret"));
    }
}
