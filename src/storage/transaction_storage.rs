use crate::models::Transaction;
use crate::storage::Storage;
use crate::types::UserId;
use dashmap::DashMap;
use tracing::warn;

/// In-memory, per-process ledger indexed by user.
///
/// Each user's entries are kept in arrival order; sorting happens on read so
/// that the ledger itself is never reordered.
pub struct TransactionStorage {
    ledger: DashMap<UserId, Vec<Transaction>>,
    history_limit: Option<usize>
}

impl TransactionStorage {
    pub fn new() -> Self {
        Self {
            ledger: DashMap::new(),
            history_limit: None
        }
    }

    /// Caps the number of transactions retained per user, the oldest by
    /// timestamp are dropped first. The transaction being appended is never
    /// the one dropped. `None` keeps everything.
    pub fn with_history_limit(mut self, history_limit: Option<usize>) -> Self {
        self.history_limit = history_limit.map(|limit| limit.max(1));
        self
    }

    fn append(&self, entries: &mut Vec<Transaction>, transaction: Transaction) {
        if entries.iter().any(|entry| entry.transaction_id == transaction.transaction_id) {
            warn!("Duplicate transaction [{}] recorded for user [{}]", transaction.transaction_id, transaction.user_id);
        }

        entries.push(transaction);

        let Some(limit) = self.history_limit else {
            return;
        };

        while entries.len() > limit {
            //NOTE: The last entry is the one just appended, it has to survive into the snapshot
            let retained = entries.len() - 1;
            let oldest = entries[..retained].iter()
                .enumerate()
                .min_by_key(|(_, entry)| entry.timestamp)
                .map(|(index, _)| index);

            match oldest {
                Some(index) => { entries.remove(index); },
                None => break
            }
        }
    }
}

fn sorted(entries: &[Transaction]) -> Vec<Transaction> {
    let mut history = entries.to_vec();
    history.sort_by_key(|transaction| transaction.timestamp);
    history
}

impl Default for TransactionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for TransactionStorage {
    fn record(&self, transaction: Transaction) {
        let mut entries = self.ledger.entry(transaction.user_id).or_default();
        self.append(&mut entries, transaction);
    }

    fn history_for(&self, user_id: UserId) -> Vec<Transaction> {
        self.ledger.get(&user_id)
            .map(|entries| sorted(&entries))
            .unwrap_or_default()
    }

    fn record_and_history(&self, transaction: Transaction) -> Vec<Transaction> {
        //NOTE: The entry guard holds the shard lock until the snapshot is taken
        let mut entries = self.ledger.entry(transaction.user_id).or_default();
        self.append(&mut entries, transaction);
        sorted(&entries)
    }

    fn transaction_count(&self) -> usize {
        self.ledger.iter().map(|entries| entries.value().len()).sum()
    }
}
