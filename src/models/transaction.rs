use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::TransactionError;
use crate::types::{parse_timestamp, CardNumber, DeviceId, MerchantId, TransactionId, UserId};

/// Represents a single transaction exactly as it arrives on the wire.
///
/// Nothing is validated at this stage; `Transaction::try_from` is the only way
/// into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub transaction_id: TransactionId,
    pub merchant_id: MerchantId,
    pub user_id: UserId,
    pub card_number: String,
    pub transaction_date: String,
    pub transaction_amount: f64,
    pub device_id: DeviceId
}

/// A validated transaction, immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Caller supplied identifier, uniqueness is not enforced.
    pub transaction_id: TransactionId,
    pub merchant_id: MerchantId,
    pub user_id: UserId,
    /// Kept for completeness, the scoring model never sees it.
    pub device_id: DeviceId,
    pub card_number: CardNumber,
    /// Ordering and durations use the instant, features use the wall clock of the offset.
    pub timestamp: DateTime<FixedOffset>,
    pub amount: f64
}

impl TryFrom<TransactionRequest> for Transaction {
    type Error = TransactionError;

    fn try_from(request: TransactionRequest) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&request.transaction_date)
            .map_err(|error| TransactionError::invalid_timestamp(&request, error))?;

        let card_number = CardNumber::from_str(&request.card_number)
            .map_err(|error| TransactionError::invalid_card_number(&request, error))?;

        if !request.transaction_amount.is_finite() || request.transaction_amount < 0.0 {
            return Err(TransactionError::invalid_amount(&request));
        }

        Ok(Transaction {
            transaction_id: request.transaction_id,
            merchant_id: request.merchant_id,
            user_id: request.user_id,
            device_id: request.device_id,
            card_number,
            timestamp,
            amount: request.transaction_amount
        })
    }
}
