//! StockWatch: stock alert watcher for the inventory console.
//!
//! Entry point that wires the HTTP inventory source into the alert engine,
//! logs advisories as they arrive, and runs until Ctrl-C.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use stockwatch_alerts::{Advisory, StockAlertEngine};
use stockwatch_alerts::notification::formatter::format_age;
use stockwatch_core::config::AppConfig;
use stockwatch_core::error::AppError;
use stockwatch_core::traits::{Clock, SystemClock};
use stockwatch_inventory::HttpInventorySource;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("StockWatch error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("STOCKWATCH_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Poll the inventory API until Ctrl-C
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StockWatch v{}", env!("CARGO_PKG_VERSION"));

    let source = HttpInventorySource::new(&config.inventory)?;
    tracing::info!("Watching inventory at {}", source.url());

    let engine = Arc::new(StockAlertEngine::new(
        Arc::new(source),
        config.alerts.clone(),
    ));

    let advisories = tokio::spawn(log_advisories(
        Arc::clone(&engine),
        engine.subscribe_advisories(),
    ));

    let poller = engine.start_default();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for Ctrl-C: {}", e)))?;

    tracing::info!("Shutdown signal received");
    poller.shutdown().await;
    advisories.abort();

    let now = SystemClock.now();
    let snapshot = engine.snapshot();
    tracing::info!(
        "{} notification(s) in log, {} unread",
        snapshot.notifications.len(),
        snapshot.unread_count
    );
    for event in snapshot.notifications.iter().filter(|e| e.is_unread()) {
        tracing::info!(
            kind = %event.kind,
            age = %format_age(event.created_at, now),
            "{}",
            event.message
        );
    }

    tracing::info!("StockWatch shut down complete");
    Ok(())
}

/// Stand-in for the console's toast area: print each advisory as it arrives
async fn log_advisories(engine: Arc<StockAlertEngine>, mut rx: broadcast::Receiver<Advisory>) {
    loop {
        match rx.recv().await {
            Ok(advisory) => {
                tracing::warn!(
                    severity = %advisory.severity,
                    tone = advisory.kind.tone(),
                    unread = engine.unread_count(),
                    "{}: {}",
                    advisory.title,
                    advisory.message
                );
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::debug!("Advisory listener lagged, {} advisories skipped", missed);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
