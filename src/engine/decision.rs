use crate::models::Verdict;
use crate::rules::{ChargebackStatus, CheckResult};
use crate::scoring::{ModelOutcome, RiskLabel};
use crate::types::TransactionId;

const CHARGEBACK_FOUND: &str = "user has chargeback history";
const CHARGEBACK_NONE: &str = "user has no chargeback history";
const MODEL_APPROVED: &str = "transaction approved by the credit model";
const MODEL_REJECTED: &str = "transaction rejected by the credit model";
const MODEL_UNAVAILABLE: &str = "credit model unavailable, transaction could not be scored";
const FINAL_APPROVED: &str = "transaction approved";
const FINAL_REJECTED: &str = "transaction should be rejected";

/// Everything the independent checks found out about one transaction.
#[derive(Debug, Clone)]
pub struct Signals {
    pub velocity: CheckResult,
    pub amount: CheckResult,
    pub chargeback: ChargebackStatus,
    pub model: ModelOutcome
}

/// Combines the signals with a plain OR, any single rejection rejects the transaction.
pub fn aggregate(transaction_id: TransactionId, signals: Signals) -> Verdict {
    let (chargeback_rejects, chargeback_message) = match signals.chargeback {
        ChargebackStatus::HasHistory => (true, CHARGEBACK_FOUND),
        ChargebackStatus::NoHistory => (false, CHARGEBACK_NONE),
        // Fail open: history that cannot be determined never blocks a transaction
        ChargebackStatus::Unavailable => (false, CHARGEBACK_NONE)
    };

    let (model_rejects, model_message) = match signals.model {
        ModelOutcome::Scored(RiskLabel::Approve) => (false, MODEL_APPROVED),
        ModelOutcome::Scored(RiskLabel::Reject) => (true, MODEL_REJECTED),
        // Fail safe: an unscored transaction is never approved
        ModelOutcome::Unavailable => (true, MODEL_UNAVAILABLE)
    };

    let rejected = signals.velocity.suspicious
        || signals.amount.suspicious
        || chargeback_rejects
        || model_rejects;

    Verdict {
        transaction_id,
        frequency_message: signals.velocity.message,
        amount_message: signals.amount.message,
        chargeback_message: chargeback_message.to_string(),
        model_message: model_message.to_string(),
        final_message: (if rejected { FINAL_REJECTED } else { FINAL_APPROVED }).to_string(),
        rejected
    }
}
