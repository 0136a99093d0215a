//! In-process inventory source.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use stockwatch_core::error::AppError;
use stockwatch_core::result::AppResult;
use stockwatch_core::traits::InventorySource;
use stockwatch_core::types::InventoryItem;

/// Inventory source serving a snapshot held in memory.
///
/// The snapshot can be replaced at any time, fetches can be made to fail,
/// and an artificial latency can be added, which makes it suitable for
/// driving the alert engine in tests and demos.
#[derive(Debug, Default)]
pub struct MemoryInventorySource {
    /// Current snapshot
    items: RwLock<Vec<InventoryItem>>,
    /// Number of upcoming fetches that fail
    failures: AtomicUsize,
    /// Number of fetches served (including failed ones)
    fetches: AtomicUsize,
    /// Delay applied to every fetch
    latency: Option<Duration>,
}

impl MemoryInventorySource {
    /// Create a source with an initial snapshot.
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    /// Delay every fetch by `latency` (uses tokio time, so it honours a paused clock).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Replace the snapshot.
    pub fn set_items(&self, items: Vec<InventoryItem>) {
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = items;
    }

    /// Make the next `count` fetches fail.
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for MemoryInventorySource {
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::external_service("Inventory source unavailable"));
        }

        Ok(self
            .items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
