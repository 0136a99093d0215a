//! Inventory record as returned by the inventory service.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A single product's stock position at the time of a snapshot.
///
/// Stock fields are optional because the inventory service does not
/// guarantee them; a record without both is unusable for alerting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product display name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Units currently on hand.
    #[serde(default, alias = "stock", alias = "currentStock")]
    pub current_stock: Option<i64>,
    /// Reorder threshold configured for the product.
    #[serde(
        default,
        alias = "min_stock",
        alias = "minimumStock",
        alias = "stock_minimo"
    )]
    pub minimum_stock: Option<i64>,
}

/// Validated stock levels of an [`InventoryItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevels {
    /// Units currently on hand, never negative.
    pub current: i64,
    /// Reorder threshold.
    pub minimum: i64,
}

impl InventoryItem {
    /// Build a well-formed record.
    pub fn new(id: i64, name: impl Into<String>, current: i64, minimum: i64) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            current_stock: Some(current),
            minimum_stock: Some(minimum),
        }
    }

    /// Stock levels, or `None` if the record is malformed (a field is
    /// missing or the on-hand count is negative).
    pub fn stock_levels(&self) -> Option<StockLevels> {
        match (self.current_stock, self.minimum_stock) {
            (Some(current), Some(minimum)) if current >= 0 => Some(StockLevels { current, minimum }),
            _ => None,
        }
    }
}
