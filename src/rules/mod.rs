mod chargeback;
mod threshold;
mod velocity;

pub use chargeback::{ChargebackLookup, ChargebackStatus};
pub use threshold::ThresholdGuard;
pub use velocity::VelocityAnalyzer;

/// Result of a single deterministic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub suspicious: bool,
    pub message: String
}

impl CheckResult {
    pub fn passed(message: impl Into<String>) -> Self {
        Self { suspicious: false, message: message.into() }
    }

    pub fn flagged(message: impl Into<String>) -> Self {
        Self { suspicious: true, message: message.into() }
    }
}
