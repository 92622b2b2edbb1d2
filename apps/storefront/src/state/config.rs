//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--api-url`, `--products`, `--page-size`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_core::{Money, DEFAULT_PAGE_SIZE};

/// Base URL of the public demo store.
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store API base URL (products and login).
    pub api_base_url: String,

    /// Load products from this JSON file instead of the API.
    ///
    /// Also switches login to offline mock tokens.
    pub products_path: Option<PathBuf>,

    /// Products per catalog page.
    pub page_size: usize,

    /// HTTP request timeout.
    pub request_timeout_secs: u64,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - API: fakestoreapi.com
    /// - Page size: 9
    /// - Currency: $ with 2 decimals
    fn default() -> Self {
        ConfigState {
            api_base_url: DEFAULT_API_URL.to_string(),
            products_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_API_URL`: Override the store API base URL
    /// - `STOREFRONT_PRODUCTS_PATH`: Load products from a JSON file
    /// - `STOREFRONT_PAGE_SIZE`: Products per page (>= 1)
    /// - `STOREFRONT_TIMEOUT_SECS`: HTTP timeout
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Display symbol
    /// - `STOREFRONT_CURRENCY_DECIMALS`: Display decimal places (0-255)
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigState::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ConfigState::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(url) = lookup("STOREFRONT_API_URL") {
            config.api_base_url = url;
        }

        if let Some(path) = lookup("STOREFRONT_PRODUCTS_PATH") {
            config.products_path = Some(PathBuf::from(path));
        }

        if let Some(size) = lookup("STOREFRONT_PAGE_SIZE") {
            config.page_size = parse_var("STOREFRONT_PAGE_SIZE", &size)?;
        }

        if let Some(secs) = lookup("STOREFRONT_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_var("STOREFRONT_TIMEOUT_SECS", &secs)?;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            config.currency_decimals = parse_var("STOREFRONT_CURRENCY_DECIMALS", &decimals)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field rules after all overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue("page_size".to_string()));
        }

        if self.products_path.is_none() && self.api_base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("api_base_url".to_string()));
        }

        Ok(())
    }

    /// True when products come from a local file and login is mocked.
    pub fn is_offline(&self) -> bool {
        self.products_path.is_some()
    }

    /// Formats an amount as a currency string.
    ///
    /// This is the only place cart totals are rounded for display.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, usize::from(self.currency_decimals))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_symbol() {
        let config = ConfigState {
            currency_symbol: "€".to_string(),
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(99999)), "€999.99");
    }

    #[test]
    fn test_format_currency_decimals() {
        let yen = ConfigState {
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(yen.format_currency(Money::new(1234.0)), "¥1234");
        assert_eq!(yen.format_currency(Money::new(12.6)), "¥13");

        let dinar = ConfigState {
            currency_decimals: 3,
            ..ConfigState::default()
        };
        assert_eq!(dinar.format_currency(Money::new(12.345)), "$12.345");
        assert_eq!(dinar.format_currency(Money::new(0.004)), "$0.004");

        let wide = ConfigState {
            currency_decimals: 25,
            ..ConfigState::default()
        };
        assert!(wide.format_currency(Money::new(1.5)).starts_with("$1.50000"));
    }

    #[test]
    fn test_format_currency_rounds_sub_cent_totals() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::new(0.012)), "$0.01");
        assert_eq!(config.format_currency(Money::new(1000.004)), "$1000.00");
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let vars = std::collections::HashMap::from([
            ("STOREFRONT_PAGE_SIZE", "4"),
            ("STOREFRONT_CURRENCY_SYMBOL", "€"),
            ("STOREFRONT_CURRENCY_DECIMALS", "3"),
        ]);
        let config =
            ConfigState::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.page_size, 4);
        assert_eq!(config.currency_decimals, 3);
        assert_eq!(config.format_currency(Money::new(2.5)), "€2.500");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let bad_decimals = ConfigState::from_lookup(|name| {
            (name == "STOREFRONT_CURRENCY_DECIMALS").then(|| "300".to_string())
        });
        assert!(matches!(bad_decimals, Err(ConfigError::InvalidValue(v)) if v == "STOREFRONT_CURRENCY_DECIMALS"));

        let zero_page =
            ConfigState::from_lookup(|name| (name == "STOREFRONT_PAGE_SIZE").then(|| "0".to_string()));
        assert!(matches!(zero_page, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate() {
        assert!(ConfigState::default().validate().is_ok());

        let zero_page = ConfigState {
            page_size: 0,
            ..ConfigState::default()
        };
        assert!(matches!(zero_page.validate(), Err(ConfigError::InvalidValue(_))));

        let no_source = ConfigState {
            api_base_url: " ".to_string(),
            ..ConfigState::default()
        };
        assert!(matches!(no_source.validate(), Err(ConfigError::MissingRequired(_))));

        let offline = ConfigState {
            api_base_url: String::new(),
            products_path: Some(PathBuf::from("products.json")),
            ..ConfigState::default()
        };
        assert!(offline.validate().is_ok());
        assert!(offline.is_offline());
    }
}
