//! HTTP surface of the risk engine.
//!
//! | Method | Path                            | Description                          |
//! |--------|---------------------------------|--------------------------------------|
//! | POST   | `/transactions`                 | Evaluate a transaction               |
//! | POST   | `/modelo`                       | Legacy alias of `/transactions`      |
//! | GET    | `/users/:user_id/transactions`  | Recorded history of a user           |
//! | GET    | `/health`                       | Liveness probe                       |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::engine::RiskEngine;
use crate::models::TransactionRequest;
use crate::storage::Storage;
use crate::types::{TransactionId, UserId};

/// Shared state handed to every handler, cheap to clone.
pub struct AppState<S: Storage> {
    engine: Arc<RiskEngine<S>>
}

impl<S: Storage> AppState<S> {
    pub fn new(engine: RiskEngine<S>) -> Self {
        Self { engine: Arc::new(engine) }
    }
}

//NOTE: Derived Clone would require S: Clone, only the Arc is cloned
impl<S: Storage> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { engine: self.engine.clone() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub transaction_id: TransactionId,
    pub transaction_date: String,
    pub transaction_amount: f64
}

pub fn create_router<S: Storage>(state: AppState<S>) -> Router {
    Router::new()
        .route("/transactions", post(evaluate_handler::<S>))
        .route("/modelo", post(evaluate_handler::<S>))
        .route("/users/:user_id/transactions", get(history_handler::<S>))
        .route("/health", get(health_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn evaluate_handler<S: Storage>(State(state): State<AppState<S>>, Json(request): Json<TransactionRequest>) -> Response {
    match state.engine.evaluate(request).await {
        Ok(verdict) => (StatusCode::OK, Json(verdict)).into_response(),
        Err(error) => {
            warn!("{error}");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: error.to_string() })).into_response()
        }
    }
}

async fn history_handler<S: Storage>(State(state): State<AppState<S>>, Path(user_id): Path<UserId>) -> Json<Vec<HistoryEntry>> {
    let history = state.engine.storage().history_for(user_id)
        .into_iter()
        .map(|transaction| HistoryEntry {
            transaction_id: transaction.transaction_id,
            transaction_date: transaction.timestamp.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string(),
            transaction_amount: transaction.amount
        })
        .collect();

    Json(history)
}

async fn health_handler<S: Storage>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let transactions = state.engine.storage().transaction_count();

    (StatusCode::OK, Json(serde_json::json!({ "status": "ok", "transactions": transactions })))
}
