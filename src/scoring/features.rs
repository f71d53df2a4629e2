//! Feature derivation for the credit model.
//!
//! The column order must match the frame the model was trained on: the raw
//! transaction fields in their original order, without `transaction_date` and
//! `device_id`, followed by the four fields derived from the timestamp.

use chrono::{Datelike, Timelike};

use crate::models::Transaction;

pub const FEATURE_COUNT: usize = 9;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "transaction_id",
    "merchant_id",
    "user_id",
    "card_number",
    "transaction_amount",
    "day",
    "month",
    "weekday",
    "seconds_since_midnight",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn derive(transaction: &Transaction) -> Self {
        let timestamp = transaction.timestamp.naive_local();

        Self([
            transaction.transaction_id as f64,
            transaction.merchant_id as f64,
            transaction.user_id as f64,
            transaction.card_number.value(),
            transaction.amount,
            f64::from(timestamp.day()),
            f64::from(timestamp.month()),
            // Monday = 0
            f64::from(timestamp.weekday().num_days_from_monday()),
            f64::from(timestamp.num_seconds_from_midnight()),
        ])
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}
