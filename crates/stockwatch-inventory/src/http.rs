//! Inventory source backed by the inventory HTTP API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing;

use stockwatch_core::config::InventoryConfig;
use stockwatch_core::error::{AppError, ErrorKind};
use stockwatch_core::result::AppResult;
use stockwatch_core::traits::InventorySource;
use stockwatch_core::types::InventoryItem;

/// Reads the product listing endpoint of the inventory API.
#[derive(Debug, Clone)]
pub struct HttpInventorySource {
    /// Shared HTTP client
    client: reqwest::Client,
    /// Full URL of the listing endpoint
    url: String,
    /// Optional bearer token
    bearer_token: Option<String>,
}

/// Accepted shapes of the listing response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    /// `[ {...}, {...} ]`
    Bare(Vec<Value>),
    /// `{ "items": [...] }` or `{ "data": [...] }`
    Wrapped {
        #[serde(alias = "data")]
        items: Vec<Value>,
    },
}

impl Listing {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Bare(records) | Self::Wrapped { items: records } => records,
        }
    }
}

impl HttpInventorySource {
    /// Build a source from configuration.
    pub fn new(config: &InventoryConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            url: config.products_url(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// URL this source reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InventorySource for HttpInventorySource {
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;

        let listing: Listing = serde_json::from_slice(&body).map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Inventory listing is not a product list: {e}"),
                e,
            )
        })?;

        Ok(decode_records(listing.into_records()))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Decode each record on its own so one bad record does not drop the snapshot.
fn decode_records(records: Vec<Value>) -> Vec<InventoryItem> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping undecodable inventory record");
                None
            }
        })
        .collect()
}
