use std::sync::Arc;
use std::time::Duration;

use tokio::task::spawn_blocking;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::models::Transaction;
use crate::scoring::{Classifier, FeatureVector, RiskLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOutcome {
    Scored(RiskLabel),
    /// The classifier failed or did not answer in time.
    Unavailable
}

/// Derives the feature vector and asks the classifier for a label, exactly once
/// per transaction.
pub struct ModelScorer {
    classifier: Arc<dyn Classifier>,
    timeout: Duration
}

impl ModelScorer {
    pub fn new(classifier: Arc<dyn Classifier>, timeout: Duration) -> Self {
        Self { classifier, timeout }
    }

    pub async fn evaluate(&self, transaction: &Transaction) -> ModelOutcome {
        let features = FeatureVector::derive(transaction);
        let transaction_id = transaction.transaction_id;

        debug!("Scoring transaction [{transaction_id}] with features {:?}", features.values());

        let classifier = self.classifier.clone();
        let prediction = spawn_blocking(move || classifier.predict(&features));

        match timeout(self.timeout, prediction).await {
            Ok(Ok(Ok(label))) => ModelOutcome::Scored(label),
            Ok(Ok(Err(error))) => {
                warn!("Credit model failed for transaction [{transaction_id}]: {error}");
                ModelOutcome::Unavailable
            }
            Ok(Err(error)) => {
                warn!("Credit model task for transaction [{transaction_id}] did not complete: {error}");
                ModelOutcome::Unavailable
            }
            Err(_) => {
                warn!("Credit model for transaction [{transaction_id}] timed out after {:?}", self.timeout);
                ModelOutcome::Unavailable
            }
        }
    }
}
