//! Inventory service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the remote inventory API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Base URL of the inventory API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the product listing endpoint.
    #[serde(default = "default_products_path")]
    pub products_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            request_timeout_seconds: default_timeout(),
            bearer_token: None,
        }
    }
}

impl InventoryConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Full URL of the product listing endpoint.
    pub fn products_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.products_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Reject an unusable endpoint.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::configuration(
                "inventory.base_url must not be empty",
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_products_path() -> String {
    "/productos".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_url_joins_slashes() {
        let config = InventoryConfig {
            base_url: "http://inventory.local/api/".to_string(),
            products_path: "/products".to_string(),
            ..InventoryConfig::default()
        };
        assert_eq!(config.products_url(), "http://inventory.local/api/products");
    }

    #[test]
    fn test_products_url_without_slashes() {
        let config = InventoryConfig {
            base_url: "http://inventory.local".to_string(),
            products_path: "items".to_string(),
            ..InventoryConfig::default()
        };
        assert_eq!(config.products_url(), "http://inventory.local/items");
    }
}
