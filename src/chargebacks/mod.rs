mod csv_table;

use thiserror::Error;

use crate::types::UserId;

pub use csv_table::CsvChargebackTable;

#[derive(Debug, Error)]
pub enum ChargebackError {
    #[error("Chargeback source error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chargeback source error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Chargeback source error: Missing column [{0}]")]
    MissingColumn(&'static str)
}

/// Read-only, per-user chargeback history owned outside of this service.
pub trait ChargebackSource: Send + Sync + 'static {
    /// `Ok(None)` when the source holds no record for the user.
    fn has_chargeback(&self, user_id: UserId) -> Result<Option<bool>, ChargebackError>;
}
