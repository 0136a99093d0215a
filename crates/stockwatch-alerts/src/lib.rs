//! Stock alert engine for StockWatch.
//!
//! This crate provides:
//! - The notification model, its kinds and severities
//! - Threshold classification of inventory snapshots
//! - A bounded, deduplicated, newest-first notification log
//! - [`StockAlertEngine`], which owns the log and samples an inventory source
//! - A cancellable polling task that drives the engine on an interval

pub mod advisory;
pub mod engine;
pub mod notification;
pub mod poller;

pub use advisory::Advisory;
pub use engine::{NotificationSnapshot, SampleReport, StockAlertEngine};
pub use notification::{NotificationEvent, NotificationId, NotificationKind, Severity};
pub use poller::PollHandle;
