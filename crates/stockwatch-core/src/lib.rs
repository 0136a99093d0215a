//! # stockwatch-core
//!
//! Core crate for StockWatch. Contains configuration schemas, typed
//! identifiers, the inventory record, the collaborator traits consumed by
//! the alert engine, and the unified error system.
//!
//! This crate has **no** internal dependencies on other StockWatch crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
