//! Inventory source trait for pluggable inventory backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::InventoryItem;

/// Trait for anything that can produce a full inventory snapshot.
///
/// Implementations must be safe to call repeatedly and concurrently. Any
/// error is treated by the alert engine as "no data this cycle".
#[async_trait]
pub trait InventorySource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the current list of inventory items.
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>>;

    /// Short name used in log lines.
    fn name(&self) -> &str {
        "inventory"
    }
}
