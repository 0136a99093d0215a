//! Notification model, classification, deduplication, and the bounded log.

pub mod classify;
pub mod dedup;
pub mod formatter;
pub mod kind;
pub mod log;
pub mod model;

pub use classify::{Candidate, Classification, classify};
pub use dedup::DedupKey;
pub use kind::{NotificationKind, Severity};
pub use log::NotificationLog;
pub use model::{NotificationEvent, NotificationId};
