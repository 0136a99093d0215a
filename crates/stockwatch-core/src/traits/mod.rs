//! Collaborator traits consumed by the alert engine.

pub mod clock;
pub mod inventory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use inventory::InventorySource;
