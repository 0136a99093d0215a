//! Stock alert engine: owns the notification log and samples inventory.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing;

use stockwatch_core::config::AlertConfig;
use stockwatch_core::traits::{Clock, InventorySource, SystemClock};

use crate::advisory::Advisory;
use crate::notification::{
    Classification, NotificationEvent, NotificationId, NotificationLog, classify,
};
use crate::poller::{self, PollHandle};

/// Diagnostics for one sampling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SampleReport {
    /// Whether the inventory fetch succeeded.
    pub fetched: bool,
    /// Number of records in the snapshot.
    pub items: usize,
    /// New notifications admitted to the log.
    pub admitted: usize,
    /// Candidates suppressed by an existing notification.
    pub duplicates: usize,
    /// Malformed records skipped.
    pub skipped: usize,
    /// Notifications evicted, or new ones dropped, to stay within capacity.
    pub evicted: usize,
}

/// Read-only projection of the engine state for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSnapshot {
    /// Notifications, newest first.
    pub notifications: Vec<NotificationEvent>,
    /// Number of unread notifications.
    pub unread_count: usize,
    /// Whether a sample is in flight.
    pub busy: bool,
}

/// Client-local stock alert engine.
///
/// The engine is the only writer of its notification log. Callers get
/// clones of the entries and change read state through the methods below.
#[derive(Debug)]
pub struct StockAlertEngine {
    /// Inventory collaborator
    source: Arc<dyn InventorySource>,
    /// Timestamp source for new notifications
    clock: Arc<dyn Clock>,
    /// Engine configuration
    config: AlertConfig,
    /// Notification log, newest first
    log: Mutex<NotificationLog>,
    /// Number of samples currently awaiting the inventory source
    in_flight: AtomicUsize,
    /// Last sequence number handed out for notification ids
    seq: AtomicU64,
    /// Advisory fan-out
    advisories: broadcast::Sender<Advisory>,
}

impl StockAlertEngine {
    /// Create an engine over the given inventory source.
    pub fn new(source: Arc<dyn InventorySource>, config: AlertConfig) -> Self {
        let (advisories, _) = broadcast::channel(config.advisory_buffer.max(1));
        Self {
            source,
            clock: Arc::new(SystemClock),
            log: Mutex::new(NotificationLog::new(config.capacity)),
            config,
            in_flight: AtomicUsize::new(0),
            seq: AtomicU64::new(0),
            advisories,
        }
    }

    /// Replace the clock used to timestamp notifications.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Run one sampling cycle.
    ///
    /// Fetch failures are logged and yield an empty report; they never
    /// reach the caller. The dedup-merge-trim step runs under one lock
    /// acquisition after the fetch resolves, so overlapping cycles cannot
    /// corrupt the log.
    pub async fn sample(&self) -> SampleReport {
        let _busy = BusyGuard::enter(&self.in_flight);

        let items = match self.source.list_items().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %e,
                    "Inventory fetch failed, no stock alerts this cycle"
                );
                return SampleReport::default();
            }
        };

        let mut report = SampleReport {
            fetched: true,
            items: items.len(),
            ..SampleReport::default()
        };

        let mut candidates = Vec::new();
        for item in &items {
            match classify(item) {
                Classification::Alert(candidate) => candidates.push(candidate),
                Classification::Healthy => {}
                Classification::Malformed => {
                    report.skipped += 1;
                    tracing::debug!(
                        product_id = %item.id,
                        "Skipping inventory record without usable stock levels"
                    );
                }
            }
        }

        let outcome = {
            let mut log = self.lock_log();
            log.merge(candidates, self.clock.now(), || {
                self.seq.fetch_add(1, Ordering::Relaxed) + 1
            })
        };

        report.admitted = outcome.admitted.len();
        report.duplicates = outcome.duplicates;
        report.evicted = outcome.evicted;

        if outcome.evicted > 0 {
            tracing::debug!(
                evicted = outcome.evicted,
                "Evicted oldest notifications to stay within capacity"
            );
        }

        if let Some(advisory) =
            Advisory::most_severe(&outcome.admitted, self.config.advisory_duration())
        {
            tracing::info!(
                kind = %advisory.kind,
                new_alerts = report.admitted,
                "{}",
                advisory.message
            );
            // No subscribers is fine; the advisory is best-effort.
            let _ = self.advisories.send(advisory);
        }

        tracing::trace!(?report, "Stock alert cycle complete");
        report
    }

    /// Sample on user demand.
    pub async fn refresh(&self) -> SampleReport {
        tracing::info!("Refreshing stock alerts");
        self.sample().await
    }

    /// Start sampling immediately and then every `interval`.
    ///
    /// A zero interval falls back to the configured poll interval, or to
    /// 30 s if that is zero as well.
    pub fn start(self: &Arc<Self>, interval: Duration) -> PollHandle {
        poller::spawn(Arc::clone(self), interval)
    }

    /// Start sampling at the configured interval.
    pub fn start_default(self: &Arc<Self>) -> PollHandle {
        self.start(self.config.poll_interval())
    }

    /// Stop a poller started by [`Self::start`]. Idempotent.
    pub fn stop(&self, handle: &PollHandle) {
        handle.stop();
    }

    /// Whether any sample is awaiting the inventory source.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Subscribe to advisories emitted by future sampling cycles.
    pub fn subscribe_advisories(&self) -> broadcast::Receiver<Advisory> {
        self.advisories.subscribe()
    }

    /// Clone of the log, newest first.
    pub fn notifications(&self) -> Vec<NotificationEvent> {
        self.lock_log().to_vec()
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.lock_log().unread_count()
    }

    /// Log, unread count and busy flag read together.
    pub fn snapshot(&self) -> NotificationSnapshot {
        let log = self.lock_log();
        NotificationSnapshot {
            notifications: log.to_vec(),
            unread_count: log.unread_count(),
            busy: self.is_busy(),
        }
    }

    /// Mark a notification as read. Unknown ids are ignored.
    pub fn mark_read(&self, id: &NotificationId) -> bool {
        let found = self.lock_log().mark_read(id);
        if !found {
            tracing::trace!(%id, "mark_read on unknown notification");
        }
        found
    }

    /// Mark every notification as read. Returns how many changed.
    pub fn mark_all_read(&self) -> usize {
        self.lock_log().mark_all_read()
    }

    /// Remove a notification. Unknown ids are ignored.
    pub fn clear(&self, id: &NotificationId) -> bool {
        let found = self.lock_log().remove(id);
        if !found {
            tracing::trace!(%id, "clear on unknown notification");
        }
        found
    }

    /// Remove every notification. Returns how many were removed.
    pub fn clear_all(&self) -> usize {
        self.lock_log().clear()
    }

    fn lock_log(&self) -> MutexGuard<'_, NotificationLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Keeps the in-flight counter raised for the lifetime of a sample,
/// including when the sample future is dropped mid-fetch.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
