//! Checkout configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Default ceiling for payment screenshots (5 MiB).
pub const DEFAULT_SCREENSHOT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of submission attempts before the advisory warning.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Checkout configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Attempts allowed before `increment_attempt` starts returning `false`.
    pub max_attempts: u32,

    /// Currency cart prices are expressed in.
    pub currency: Currency,

    /// Payment screenshot upload policy.
    pub screenshot: ScreenshotPolicy,

    /// Storefront API endpoints.
    pub api: ApiConfig,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            currency: Currency::NPR,
            screenshot: ScreenshotPolicy::default(),
            api: ApiConfig::default(),
        }
    }
}

impl CheckoutConfig {
    /// Load config from a TOML or JSON file (chosen by extension).
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Which uploads are accepted as payment proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotPolicy {
    pub max_bytes: u64,
    pub mime_types: Vec<String>,
}

impl Default for ScreenshotPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_SCREENSHOT_MAX_BYTES,
            mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

/// Storefront API location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub orders_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            orders_path: "/orders".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.screenshot.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.screenshot.mime_types.len(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CheckoutConfig::from_toml(
            r#"
            max_attempts = 5

            [screenshot]
            max_bytes = 1048576
            "#,
        )
        .unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.screenshot.max_bytes, 1024 * 1024);
        assert!(config.screenshot.mime_types.contains(&"image/png".to_string()));
        assert_eq!(config.api.orders_path, "/orders");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("medsupply-checkout-{}.toml", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let mut config = CheckoutConfig::default();
        config.currency = Currency::INR;
        config.save(&path).unwrap();

        let loaded = CheckoutConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CheckoutConfig::load("/nonexistent/checkout.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
