//! Inventory source adapters for StockWatch.
//!
//! - [`HttpInventorySource`] reads the product listing of the inventory API.
//! - [`MemoryInventorySource`] serves a replaceable in-process snapshot.

pub mod http;
pub mod memory;

pub use http::HttpInventorySource;
pub use memory::MemoryInventorySource;
