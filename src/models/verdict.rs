use serde::{Deserialize, Serialize};

use crate::types::TransactionId;

/// The outcome of evaluating one transaction.
///
/// Every check contributes its own rationale so the caller can see why a
/// transaction was rejected, not only that it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub transaction_id: TransactionId,
    pub frequency_message: String,
    pub amount_message: String,
    pub chargeback_message: String,
    pub model_message: String,
    pub final_message: String,
    pub rejected: bool
}
