mod card_number;
mod errors;
mod timestamp;

pub use card_number::CardNumber;
pub use errors::{CardNumberError, TimestampError};
pub use timestamp::parse_timestamp;

pub type TransactionId = i64;
pub type MerchantId = i64;
pub type UserId = i64;
pub type DeviceId = i64;
