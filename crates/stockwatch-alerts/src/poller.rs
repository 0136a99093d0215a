//! Poller task that drives [`StockAlertEngine::sample`] on an interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing;

use stockwatch_core::config::alerts::DEFAULT_POLL_INTERVAL_MS;

use crate::engine::StockAlertEngine;

/// Cancellation handle for a running poller.
///
/// Dropping the handle also stops the poller.
#[derive(Debug)]
pub struct PollHandle {
    /// Cancel signal observed by the poll loop
    cancel: watch::Sender<bool>,
    /// The spawned poll loop
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop scheduling samples. A sample already in flight completes and
    /// applies its results. Calling this more than once is harmless.
    pub fn stop(&self) {
        let was_stopped = self.cancel.send_replace(true);
        if !was_stopped {
            tracing::info!("Stock alert poller stopping");
        }
    }

    /// Whether [`Self::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Whether the poll loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the poller and wait for any in-flight sample to finish.
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            tracing::error!("Stock alert poller task failed: {}", e);
        }
    }
}

/// Spawn the poll loop on the current tokio runtime.
pub(crate) fn spawn(engine: Arc<StockAlertEngine>, interval: Duration) -> PollHandle {
    let interval = if interval.is_zero() {
        let configured = engine.config().poll_interval();
        let fallback = if configured.is_zero() {
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            configured
        };
        tracing::warn!(
            "Zero poll interval requested, using {}ms",
            fallback.as_millis()
        );
        fallback
    } else {
        interval
    };

    let (cancel, rx) = watch::channel(false);
    let task = tokio::spawn(run(engine, interval, rx));

    PollHandle { cancel, task }
}

/// Sample once immediately, then once per `interval`, until cancelled.
async fn run(engine: Arc<StockAlertEngine>, interval: Duration, mut cancel: watch::Receiver<bool>) {
    tracing::info!(
        "Stock alert poller started with interval={}ms",
        interval.as_millis()
    );

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            changed = cancel.changed() => {
                // Err means the handle was dropped.
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if *cancel.borrow() {
                    break;
                }
                engine.sample().await;
            }
        }
    }

    tracing::info!("Stock alert poller stopped");
}
