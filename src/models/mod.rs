mod errors;
mod transaction;
mod verdict;

pub use errors::TransactionError;
pub use transaction::{Transaction, TransactionRequest};
pub use verdict::Verdict;
