use crate::models::TransactionRequest;
use crate::types::{CardNumberError, TimestampError, TransactionId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid transaction_date for transaction [{transaction_id}] of user [{user_id}]: {source}")]
    InvalidTimestamp {
        transaction_id: TransactionId,
        user_id: UserId,
        source: TimestampError
    },
    #[error("Invalid card_number for transaction [{transaction_id}] of user [{user_id}]: {source}")]
    InvalidCardNumber {
        transaction_id: TransactionId,
        user_id: UserId,
        source: CardNumberError
    },
    #[error("Amount must be a non-negative number for transaction [{transaction_id}] of user [{user_id}], got [{amount}]")]
    InvalidAmount {
        transaction_id: TransactionId,
        user_id: UserId,
        amount: f64
    }
}

impl TransactionError {
    pub fn invalid_timestamp(request: &TransactionRequest, source: TimestampError) -> Self {
        Self::InvalidTimestamp {
            transaction_id: request.transaction_id,
            user_id: request.user_id,
            source
        }
    }

    pub fn invalid_card_number(request: &TransactionRequest, source: CardNumberError) -> Self {
        Self::InvalidCardNumber {
            transaction_id: request.transaction_id,
            user_id: request.user_id,
            source
        }
    }

    pub fn invalid_amount(request: &TransactionRequest) -> Self {
        Self::InvalidAmount {
            transaction_id: request.transaction_id,
            user_id: request.user_id,
            amount: request.transaction_amount
        }
    }
}
