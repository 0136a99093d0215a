//! Shared domain types.

pub mod id;
pub mod inventory;

pub use id::ProductId;
pub use inventory::{InventoryItem, StockLevels};
