//! # Cart Configuration
//!
//! Settings a host needs to open a cart and show its totals.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Explicit overrides from the host (e.g. CLI flags)
//! 2. Environment variables (`BUTTERFLY_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read once at startup and never changes afterwards.

use std::path::{Path, PathBuf};

use butterfly_core::{Money, DEFAULT_SHIPPING_FEE};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::slot::{FileSlot, DEFAULT_CART_KEY};

/// Cart host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Key of the durable slot. Default: `"cart"`
    pub storage_key: String,

    /// Directory holding file slots. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Flat shipping fee added at checkout
    pub shipping_fee: Money,

    /// Base URL of the product API, used to resolve relative image paths
    pub api_base_url: String,

    /// Currency symbol, printed after the amount
    pub currency_symbol: String,

    /// Thousands separator for display
    pub thousands_separator: char,
}

impl Default for CartConfig {
    /// Defaults match the storefront: `cart` key, 30.000 ₫ shipping,
    /// `vi-VN` grouping.
    fn default() -> Self {
        CartConfig {
            storage_key: DEFAULT_CART_KEY.to_string(),
            data_dir: None,
            shipping_fee: DEFAULT_SHIPPING_FEE,
            api_base_url: "http://localhost:8080".to_string(),
            currency_symbol: "₫".to_string(),
            thousands_separator: '.',
        }
    }
}

impl CartConfig {
    /// Creates a CartConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BUTTERFLY_CART_KEY`: Override the slot key
    /// - `BUTTERFLY_DATA_DIR`: Override the data directory
    /// - `BUTTERFLY_SHIPPING_FEE`: Override the shipping fee (integer dong)
    /// - `BUTTERFLY_API_BASE_URL`: Override the product API base URL
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CartConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CartConfig::default();

        if let Some(key) = lookup("BUTTERFLY_CART_KEY").filter(|k| !k.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
        }

        if let Some(dir) = lookup("BUTTERFLY_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(fee) = lookup("BUTTERFLY_SHIPPING_FEE") {
            match fee.trim().parse::<i64>() {
                Ok(minor) if minor >= 0 => config.shipping_fee = Money::from_minor(minor),
                _ => warn!(value = %fee, "ignoring invalid BUTTERFLY_SHIPPING_FEE"),
            }
        }

        if let Some(url) = lookup("BUTTERFLY_API_BASE_URL").filter(|u| !u.is_empty()) {
            config.api_base_url = url;
        }

        config
    }

    /// Directory file slots live in.
    ///
    /// ## Resolution
    /// - `data_dir` if set
    /// - Linux: `~/.local/share/oceanbutterfly-shop`
    /// - macOS: `~/Library/Application Support/com.oceanbutterfly.shop`
    /// - Fallback: `./.butterfly`
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        ProjectDirs::from("com", "oceanbutterfly", "shop")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| Path::new(".butterfly").to_path_buf())
    }

    /// The file slot this configuration points at.
    pub fn file_slot(&self) -> FileSlot {
        FileSlot::in_dir(self.resolve_data_dir(), self.storage_key.clone())
    }

    /// Formats an amount the way the storefront shows prices.
    ///
    /// ## Example
    /// ```rust
    /// use butterfly_cart::CartConfig;
    /// use butterfly_core::Money;
    ///
    /// let config = CartConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(120_000)), "120.000 ₫");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{} {}",
            amount.format_grouped(self.thousands_separator),
            self.currency_symbol
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.shipping_fee.minor(), 30_000);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("BUTTERFLY_CART_KEY", "guest-cart"),
            ("BUTTERFLY_DATA_DIR", "/var/lib/butterfly"),
            ("BUTTERFLY_SHIPPING_FEE", "15000"),
        ]));

        assert_eq!(config.storage_key, "guest-cart");
        assert_eq!(config.resolve_data_dir(), PathBuf::from("/var/lib/butterfly"));
        assert_eq!(config.shipping_fee.minor(), 15_000);
        assert_eq!(
            config.file_slot().path(),
            Path::new("/var/lib/butterfly/guest-cart.json")
        );
    }

    #[test]
    fn test_invalid_shipping_fee_keeps_default() {
        let config = CartConfig::from_lookup(lookup_from(&[("BUTTERFLY_SHIPPING_FEE", "-1")]));
        assert_eq!(config.shipping_fee.minor(), 30_000);

        let config = CartConfig::from_lookup(lookup_from(&[("BUTTERFLY_SHIPPING_FEE", "free")]));
        assert_eq!(config.shipping_fee.minor(), 30_000);
    }

    #[test]
    fn test_blank_key_keeps_default() {
        let config = CartConfig::from_lookup(lookup_from(&[("BUTTERFLY_CART_KEY", "  ")]));
        assert_eq!(config.storage_key, "cart");
    }

    #[test]
    fn test_format_currency() {
        let config = CartConfig::default();
        assert_eq!(config.format_currency(Money::from_minor(0)), "0 ₫");
        assert_eq!(config.format_currency(Money::from_minor(650_000)), "650.000 ₫");
        assert_eq!(config.format_currency(Money::from_minor(1_250_000)), "1.250.000 ₫");
    }
}
