mod transaction_storage;

use crate::models::Transaction;
use crate::types::UserId;

pub use transaction_storage::TransactionStorage;

/// Ledger of every transaction the service has received.
///
/// Histories are always returned in ascending timestamp order.
pub trait Storage: Send + Sync + 'static {
    #[cfg_attr(not(test), allow(dead_code))]
    fn record(&self, transaction: Transaction);
    fn history_for(&self, user_id: UserId) -> Vec<Transaction>;
    /// Appends and returns the user's history in one step, no other append for
    /// the same user can land in between.
    fn record_and_history(&self, transaction: Transaction) -> Vec<Transaction>;
    fn transaction_count(&self) -> usize;
}
