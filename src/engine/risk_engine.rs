use std::sync::Arc;

use tracing::info;

use crate::engine::{aggregate, Signals};
use crate::models::{Transaction, TransactionError, TransactionRequest, Verdict};
use crate::rules::{ChargebackLookup, ThresholdGuard, VelocityAnalyzer};
use crate::scoring::ModelScorer;
use crate::storage::Storage;

/// Transaction risk-evaluation pipeline.
///
/// Every evaluation records the transaction first, then runs the velocity,
/// amount, chargeback and model checks independently and folds them into a
/// single `Verdict`.
pub struct RiskEngine<S: Storage> {
    storage: Arc<S>,
    velocity: VelocityAnalyzer,
    threshold: ThresholdGuard,
    chargebacks: ChargebackLookup,
    scorer: ModelScorer
}

impl<S: Storage> RiskEngine<S> {
    /// Creates an engine with the default velocity and amount rules.
    pub fn new(storage: Arc<S>, chargebacks: ChargebackLookup, scorer: ModelScorer) -> Self {
        Self {
            storage,
            velocity: VelocityAnalyzer::default(),
            threshold: ThresholdGuard::default(),
            chargebacks,
            scorer
        }
    }

    pub fn with_velocity(mut self, velocity: VelocityAnalyzer) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_threshold(mut self, threshold: ThresholdGuard) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Validates, records and evaluates one transaction.
    ///
    /// # Errors
    /// Returns `TransactionError` when the request cannot be turned into a
    /// transaction, in which case nothing is recorded. Lookup and model
    /// failures are never errors, they are folded into the verdict.
    pub async fn evaluate(&self, request: TransactionRequest) -> Result<Verdict, TransactionError> {
        let transaction = Transaction::try_from(request)?;
        let history = self.storage.record_and_history(transaction.clone());

        let velocity = self.velocity.evaluate(&history);
        let amount = self.threshold.evaluate(transaction.amount);
        let (chargeback, model) = tokio::join!(
            self.chargebacks.evaluate(transaction.user_id),
            self.scorer.evaluate(&transaction)
        );

        let verdict = aggregate(transaction.transaction_id, Signals { velocity, amount, chargeback, model });

        info!(
            transaction_id = transaction.transaction_id,
            user_id = transaction.user_id,
            history = history.len(),
            rejected = verdict.rejected,
            "{}", verdict.final_message
        );

        Ok(verdict)
    }
}
