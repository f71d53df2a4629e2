use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

/// Evaluates payment transactions against fraud heuristics and a trained
/// credit model, answering with an accept/reject verdict over HTTP.
#[derive(Parser, Debug)]
#[command(name = "transaction-risk-engine", version)]
pub struct Config {
    /// Address the HTTP API binds to.
    #[arg(long, env = "RISK_ENGINE_LISTEN_ADDR", default_value = "127.0.0.1:8000")]
    pub listen_addr: String,

    /// CSV export of the chargeback history (`user_id,has_cbk`).
    #[arg(long, env = "RISK_ENGINE_CHARGEBACKS", default_value = "cbk_stats.csv")]
    pub chargebacks: PathBuf,

    /// JSON artifact of the trained credit model.
    #[arg(long, env = "RISK_ENGINE_MODEL", default_value = "model.json")]
    pub model: PathBuf,

    /// Number of consecutive transactions that form a burst.
    #[arg(long, env = "RISK_ENGINE_VELOCITY_WINDOW", default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub velocity_window: u16,

    /// Longest time span, in minutes, a burst may cover.
    #[arg(long, env = "RISK_ENGINE_VELOCITY_MINUTES", default_value_t = 30)]
    pub velocity_minutes: u32,

    /// Amounts strictly above this value are flagged.
    #[arg(long, env = "RISK_ENGINE_AMOUNT_CEILING", default_value_t = 10_000.0)]
    pub amount_ceiling: f64,

    /// Upper bound for a single chargeback lookup or model prediction.
    #[arg(long, env = "RISK_ENGINE_LOOKUP_TIMEOUT_MS", default_value_t = 500)]
    pub lookup_timeout_ms: u64,

    /// Keep at most this many transactions per user, unbounded when omitted.
    #[arg(long, env = "RISK_ENGINE_HISTORY_LIMIT", value_parser = clap::value_parser!(u32).range(1..))]
    pub history_limit: Option<u32>,

    /// One of: error, warn, info, debug, trace.
    #[arg(long, env = "RISK_ENGINE_LOG_LEVEL", default_value = "info")]
    pub log_level: String
}

impl Config {
    /// Checks the constraints between flags that clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.history_limit {
            ensure!(
                limit >= u32::from(self.velocity_window),
                "--history-limit ({limit}) must be at least --velocity-window ({}), a shorter history can never hold a burst",
                self.velocity_window
            );
        }

        Ok(())
    }
}
