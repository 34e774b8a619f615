//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TIDEWEAR_DATA_DIR` - Key-value store directory (default: `.tidewear`)
//! - `TIDEWEAR_CATALOG_PATH` - Catalog JSON read on first load (default: `data/products.json`)
//! - `TIDEWEAR_SHIPPING_METHOD` - Default shipping method (default: `standard`)
//! - `TIDEWEAR_DESTINATION` - Default destination (default: `CA`)
//! - `TIDEWEAR_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tidewear_core::{Destination, ShippingMethod};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid log format: {s} (expected pretty or json)")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory backing the key-value store
    pub data_dir: PathBuf,
    /// Catalog document read when nothing is cached
    pub catalog_path: PathBuf,
    /// Shipping method preselected in the cart summary
    pub shipping_method: ShippingMethod,
    /// Destination preselected in the cart summary
    pub destination: Destination,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".tidewear"),
            catalog_path: PathBuf::from("data/products.json"),
            shipping_method: ShippingMethod::default(),
            destination: Destination::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            data_dir: lookup("TIDEWEAR_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            catalog_path: lookup("TIDEWEAR_CATALOG_PATH")
                .map_or(defaults.catalog_path, PathBuf::from),
            shipping_method: parse_or(
                &lookup,
                "TIDEWEAR_SHIPPING_METHOD",
                defaults.shipping_method,
            )?,
            destination: parse_or(&lookup, "TIDEWEAR_DESTINATION", defaults.destination)?,
            log_format: parse_or(&lookup, "TIDEWEAR_LOG_FORMAT", defaults.log_format)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
