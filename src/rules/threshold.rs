use crate::rules::CheckResult;

pub const DEFAULT_AMOUNT_CEILING: f64 = 10_000.0;

const AMOUNT_OK: &str = "transaction amount within the established limit";

/// Flags amounts strictly above a fixed ceiling, an amount equal to the ceiling passes.
#[derive(Debug, Clone)]
pub struct ThresholdGuard {
    ceiling: f64
}

impl ThresholdGuard {
    pub fn new(ceiling: f64) -> Self {
        Self { ceiling }
    }

    pub fn evaluate(&self, amount: f64) -> CheckResult {
        if amount > self.ceiling {
            return CheckResult::flagged(format!("suspicious behaviour: amount above the established limit of {}", self.ceiling));
        }

        CheckResult::passed(AMOUNT_OK)
    }
}

impl Default for ThresholdGuard {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_CEILING)
    }
}
