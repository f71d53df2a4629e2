use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: Value is an empty string")]
    Empty,
    #[error("Timestamp error: Unrecognised format [{0}]")]
    InvalidFormat(String)
}

#[derive(Debug, Error)]
pub enum CardNumberError {
    #[error("Card number error: No digits left after removing the mask")]
    Empty,
    #[error("Card number error: Unexpected character [{0}]")]
    InvalidCharacter(char),
    #[error("Card number error: {0}")]
    InvalidNumber(#[from] std::num::ParseFloatError),
    #[error("Card number error: [{0}] digits do not fit a finite number")]
    OutOfRange(usize)
}
