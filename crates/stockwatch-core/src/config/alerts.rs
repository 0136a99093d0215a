//! Stock alert engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Stock alert engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Interval in milliseconds between inventory samples.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Maximum number of notifications kept in the log.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// How long the presentation layer should display an advisory, in milliseconds.
    #[serde(default = "default_advisory_duration")]
    pub advisory_duration_ms: u64,
    /// Buffer size of the advisory broadcast channel.
    #[serde(default = "default_advisory_buffer")]
    pub advisory_buffer: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            capacity: default_capacity(),
            advisory_duration_ms: default_advisory_duration(),
            advisory_buffer: default_advisory_buffer(),
        }
    }
}

impl AlertConfig {
    /// Polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Advisory display duration as a [`Duration`].
    pub fn advisory_duration(&self) -> Duration {
        Duration::from_millis(self.advisory_duration_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::configuration(
                "alerts.poll_interval_ms must be greater than zero",
            ));
        }
        if self.capacity == 0 {
            return Err(AppError::configuration(
                "alerts.capacity must be greater than zero",
            ));
        }
        if self.advisory_buffer == 0 {
            return Err(AppError::configuration(
                "alerts.advisory_buffer must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Default polling interval (30 seconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Default log capacity.
pub const DEFAULT_CAPACITY: usize = 50;

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_advisory_duration() -> u64 {
    4_000
}

fn default_advisory_buffer() -> usize {
    16
}
