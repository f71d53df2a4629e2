use serde::Deserialize;
use thiserror::Error;

use crate::scoring::FeatureVector;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Classifier error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Classifier error: Feature schema mismatch, expected {expected:?} but the model was trained on {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>
    },
    #[error("Classifier error: Feature index [{0}] is out of range")]
    FeatureOutOfRange(usize),
    #[error("Classifier error: Label [{0}] is not a known class")]
    UnknownLabel(u8),
    #[error("Classifier error: Model contains no trees")]
    Empty
}

/// Binary label produced by the credit model: 0 approves, 1 rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum RiskLabel {
    Approve,
    Reject
}

impl TryFrom<u8> for RiskLabel {
    type Error = ClassifierError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RiskLabel::Approve),
            1 => Ok(RiskLabel::Reject),
            other => Err(ClassifierError::UnknownLabel(other))
        }
    }
}

/// A trained model, loaded once at startup and shared by every request.
pub trait Classifier: Send + Sync + 'static {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, ClassifierError>;
}
