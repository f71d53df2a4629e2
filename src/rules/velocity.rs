use chrono::TimeDelta;
use tracing::debug;

use crate::models::Transaction;
use crate::rules::CheckResult;

pub const DEFAULT_WINDOW: usize = 3;
pub const DEFAULT_MAX_MINUTES: i64 = 30;

const FREQUENCY_OK: &str = "transaction frequency within expectations";

/// Detects bursts of transactions from a single user.
///
/// A burst is any run of `window` consecutive transactions (by position in the
/// time-sorted history) whose first and last timestamps are at most
/// `max_duration` apart. The boundary is inclusive.
#[derive(Debug, Clone)]
pub struct VelocityAnalyzer {
    window: usize,
    max_duration: TimeDelta
}

impl VelocityAnalyzer {
    pub fn new(window: usize, max_duration: TimeDelta) -> Self {
        Self {
            window: window.max(1),
            max_duration
        }
    }

    /// Expects the history of one user, sorted by ascending timestamp.
    pub fn evaluate(&self, history: &[Transaction]) -> CheckResult {
        if history.len() < self.window {
            return CheckResult::passed(FREQUENCY_OK);
        }

        let burst = history.windows(self.window).find(|run| {
            match (run.first(), run.last()) {
                (Some(first), Some(last)) => last.timestamp - first.timestamp <= self.max_duration,
                _ => false
            }
        });

        match burst {
            Some(run) => {
                debug!(
                    "Burst of [{}] transactions for user [{}] starting at transaction [{}]",
                    run.len(), run[0].user_id, run[0].transaction_id
                );

                CheckResult::flagged(format!(
                    "suspicious behaviour: {} or more transactions in a row within {} minutes",
                    self.window,
                    self.max_duration.num_minutes()
                ))
            }
            None => CheckResult::passed(format!("user has {} or more non-suspicious transactions", self.window))
        }
    }
}

impl Default for VelocityAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, TimeDelta::minutes(DEFAULT_MAX_MINUTES))
    }
}
