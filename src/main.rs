mod api;
mod chargebacks;
mod config;
mod engine;
mod models;
mod rules;
mod scoring;
mod storage;
mod types;

use std::io::stderr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::api::{create_router, AppState};
use crate::chargebacks::CsvChargebackTable;
use crate::config::Config;
use crate::engine::RiskEngine;
use crate::rules::{ChargebackLookup, ThresholdGuard, VelocityAnalyzer};
use crate::scoring::{DecisionForest, ModelScorer};
use crate::storage::{Storage, TransactionStorage};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    setup_logging(parse_log_level(&config.log_level));
    config.validate()?;

    //NOTE: Both external sources are loaded before binding, the service never answers without them
    let chargebacks = CsvChargebackTable::from_path(&config.chargebacks)
        .with_context(|| format!("Failed to load chargeback history from {}", config.chargebacks.display()))?;

    let classifier = DecisionForest::from_path(&config.model)
        .with_context(|| format!("Failed to load credit model from {}", config.model.display()))?;

    let timeout = Duration::from_millis(config.lookup_timeout_ms);
    let storage = Arc::new(TransactionStorage::new()
        .with_history_limit(config.history_limit.map(|limit| limit as usize)));

    let engine = RiskEngine::new(
        storage.clone(),
        ChargebackLookup::new(Arc::new(chargebacks), timeout),
        ModelScorer::new(Arc::new(classifier), timeout)
    )
    .with_velocity(VelocityAnalyzer::new(
        usize::from(config.velocity_window),
        TimeDelta::minutes(i64::from(config.velocity_minutes))
    ))
    .with_threshold(ThresholdGuard::new(config.amount_ceiling));

    let listener = TcpListener::bind(&config.listen_addr).await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, create_router(AppState::new(engine)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shut down after evaluating [{}] transactions", storage.transaction_count());

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for the shutdown signal: {error}");
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received, draining connections");
}
