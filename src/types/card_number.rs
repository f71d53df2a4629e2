use crate::types::errors::CardNumberError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MASK: char = '*';

/// A card number as received (possibly masked) together with the numeric value
/// the scoring model was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct CardNumber {
    masked: String,
    value: f64
}

impl CardNumber {
    /// The digits left after stripping the mask, read as a single number.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Display for CardNumber {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.masked)
    }
}

impl FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let masked = value.trim();
        let digits: String = masked.chars().filter(|c| *c != MASK).collect();

        if digits.is_empty() {
            return Err(CardNumberError::Empty);
        }

        if let Some(invalid) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(CardNumberError::InvalidCharacter(invalid));
        }

        let value = digits.parse::<f64>()?;

        if !value.is_finite() {
            return Err(CardNumberError::OutOfRange(digits.len()));
        }

        Ok(CardNumber {
            masked: masked.to_string(),
            value
        })
    }
}
