use std::sync::Arc;
use std::time::Duration;

use tokio::task::spawn_blocking;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::chargebacks::ChargebackSource;
use crate::types::UserId;

/// What the chargeback source could tell us about a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargebackStatus {
    HasHistory,
    NoHistory,
    /// No record, a failing source or a timeout. Never an error for the caller.
    Unavailable
}

/// Queries a `ChargebackSource` on the blocking pool under a bounded timeout.
pub struct ChargebackLookup {
    source: Arc<dyn ChargebackSource>,
    timeout: Duration
}

impl ChargebackLookup {
    pub fn new(source: Arc<dyn ChargebackSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub async fn evaluate(&self, user_id: UserId) -> ChargebackStatus {
        let source = self.source.clone();
        let lookup = spawn_blocking(move || source.has_chargeback(user_id));

        match timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(Some(true)))) => ChargebackStatus::HasHistory,
            Ok(Ok(Ok(Some(false)))) => ChargebackStatus::NoHistory,
            Ok(Ok(Ok(None))) => {
                debug!("No chargeback record for user [{user_id}]");
                ChargebackStatus::Unavailable
            }
            Ok(Ok(Err(error))) => {
                warn!("Chargeback lookup for user [{user_id}] failed: {error}");
                ChargebackStatus::Unavailable
            }
            Ok(Err(error)) => {
                warn!("Chargeback lookup task for user [{user_id}] did not complete: {error}");
                ChargebackStatus::Unavailable
            }
            Err(_) => {
                warn!("Chargeback lookup for user [{user_id}] timed out after {:?}", self.timeout);
                ChargebackStatus::Unavailable
            }
        }
    }
}
