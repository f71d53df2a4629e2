use super::handlers::{ErrorResponse, HistoryEntry};
use super::{create_router, AppState};

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::chargebacks::CsvChargebackTable;
use crate::engine::RiskEngine;
use crate::models::{Transaction, Verdict};
use crate::rules::ChargebackLookup;
use crate::scoring::{DecisionForest, ModelScorer};
use crate::storage::{Storage, TransactionStorage};
use crate::types::UserId;

const CHARGEBACKS: &str = "user_id,has_cbk\n75710,True\n81152,False\n";

/// Rejects anything above 5000 that happens after 22:00.
const MODEL: &str = r#"{
    "features": ["transaction_id","merchant_id","user_id","card_number","transaction_amount","day","month","weekday","seconds_since_midnight"],
    "trees": [{
        "feature": 4, "threshold": 5000.0,
        "left": { "label": 0 },
        "right": { "feature": 8, "threshold": 79200.0, "left": { "label": 0 }, "right": { "label": 1 } }
    }]
}"#;

fn create_router_with<S: Storage>(storage: Arc<S>) -> Result<Router> {
    let timeout = Duration::from_millis(500);
    let table = CsvChargebackTable::from_reader(CHARGEBACKS.as_bytes())?;
    let forest = DecisionForest::from_reader(MODEL.as_bytes())?;

    let engine = RiskEngine::new(
        storage,
        ChargebackLookup::new(Arc::new(table), timeout),
        ModelScorer::new(Arc::new(forest), timeout)
    );

    Ok(create_router(AppState::new(engine)))
}

fn create_test_router() -> Result<Router> {
    create_router_with(Arc::new(TransactionStorage::new()))
}

/// Delegates to an in-memory ledger and counts evaluated appends.
#[derive(Default)]
struct AuditedStorage {
    inner: TransactionStorage,
    appends: AtomicUsize
}

impl Storage for AuditedStorage {
    fn record(&self, transaction: Transaction) {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.inner.record(transaction);
    }

    fn history_for(&self, user_id: UserId) -> Vec<Transaction> {
        self.inner.history_for(user_id)
    }

    fn record_and_history(&self, transaction: Transaction) -> Vec<Transaction> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.inner.record_and_history(transaction)
    }

    fn transaction_count(&self) -> usize {
        self.inner.transaction_count()
    }
}

fn transaction(transaction_id: i64, user_id: i64, transaction_date: &str, amount: f64) -> Value {
    json!({
        "transaction_id": transaction_id,
        "merchant_id": 29744,
        "user_id": user_id,
        "card_number": "434505******9116",
        "transaction_date": transaction_date,
        "transaction_amount": amount,
        "device_id": 285475
    })
}

async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, Vec<u8>)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes().to_vec();

    Ok((status, body))
}

async fn get(router: &Router, path: &str) -> Result<(StatusCode, Vec<u8>)> {
    send(router, Request::builder().uri(path).body(Body::empty())?).await
}

async fn post_json(router: &Router, path: &str, body: &Value) -> Result<(StatusCode, Vec<u8>)> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;

    send(router, request).await
}

#[tokio::test]
async fn test_health_endpoint_reports_recorded_transactions() -> Result<()> {
    let router = create_test_router()?;

    post_json(&router, "/transactions", &transaction(1, 1, "2019-12-01 10:00:00", 10.0)).await?;
    let (status, body) = get(&router, "/health").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transactions"], 1);

    Ok(())
}

#[tokio::test]
async fn test_transaction_endpoint_approves_ordinary_transaction() -> Result<()> {
    let router = create_test_router()?;

    let (status, body) = post_json(&router, "/transactions", &transaction(21320398, 81152, "2019-12-01 10:00:00", 374.56)).await?;
    let verdict: Verdict = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict.transaction_id, 21320398);
    assert!(!verdict.rejected);
    assert_eq!(verdict.frequency_message, "transaction frequency within expectations");
    assert_eq!(verdict.amount_message, "transaction amount within the established limit");
    assert_eq!(verdict.chargeback_message, "user has no chargeback history");
    assert_eq!(verdict.model_message, "transaction approved by the credit model");
    assert_eq!(verdict.final_message, "transaction approved");

    Ok(())
}

#[tokio::test]
async fn test_transaction_endpoint_reports_each_rejection_reason() -> Result<()> {
    let router = create_test_router()?;

    let (status, body) = post_json(&router, "/transactions", &transaction(1, 75710, "2019-12-01T23:30:00", 15_000.0)).await?;
    let verdict: Verdict = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert!(verdict.rejected);
    assert!(verdict.amount_message.starts_with("suspicious behaviour"));
    assert_eq!(verdict.chargeback_message, "user has chargeback history");
    assert_eq!(verdict.model_message, "transaction rejected by the credit model");
    assert_eq!(verdict.final_message, "transaction should be rejected");

    Ok(())
}

#[tokio::test]
async fn test_legacy_path_evaluates_transactions() -> Result<()> {
    let router = create_test_router()?;

    let (status, body) = post_json(&router, "/modelo", &transaction(1, 2, "2019-12-01 10:00:00", 10.0)).await?;
    let verdict: Verdict = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert!(!verdict.rejected);

    Ok(())
}

#[tokio::test]
async fn test_malformed_timestamp_returns_bad_request() -> Result<()> {
    let router = create_test_router()?;

    let (status, body) = post_json(&router, "/transactions", &transaction(5, 1, "31/12/2019 10:00", 10.0)).await?;
    let error: ErrorResponse = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.error.contains("transaction_date"));

    let (_, body) = get(&router, "/health").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(json["transactions"], 0);

    Ok(())
}

#[tokio::test]
async fn test_missing_field_is_rejected_before_evaluation() -> Result<()> {
    let router = create_test_router()?;

    let (status, _) = post_json(&router, "/transactions", &json!({ "transaction_id": 1 })).await?;

    assert!(status.is_client_error());

    Ok(())
}

#[tokio::test]
async fn test_history_endpoint_lists_user_transactions_in_order() -> Result<()> {
    let router = create_test_router()?;

    post_json(&router, "/transactions", &transaction(2, 3, "2019-12-01 12:00:00", 20.0)).await?;
    post_json(&router, "/transactions", &transaction(1, 3, "2019-12-01 09:00:00", 10.0)).await?;
    post_json(&router, "/transactions", &transaction(3, 4, "2019-12-01 10:00:00", 30.0)).await?;

    let (status, body) = get(&router, "/users/3/transactions").await?;
    let history: Vec<HistoryEntry> = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.iter().map(|entry| entry.transaction_id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(history[0].transaction_date, "2019-12-01 09:00:00+00:00");
    assert_eq!(history[1].transaction_amount, 20.0);

    Ok(())
}

#[tokio::test]
async fn test_third_rapid_request_is_rejected_over_http() -> Result<()> {
    let router = create_test_router()?;

    for (transaction_id, date) in [(1, "2019-12-01 10:00:00"), (2, "2019-12-01 10:02:00")] {
        let (_, body) = post_json(&router, "/transactions", &transaction(transaction_id, 6, date, 10.0)).await?;
        let verdict: Verdict = serde_json::from_slice(&body)?;
        assert!(!verdict.rejected);
    }

    let (_, body) = post_json(&router, "/transactions", &transaction(3, 6, "2019-12-01 10:04:00", 10.0)).await?;
    let verdict: Verdict = serde_json::from_slice(&body)?;

    assert!(verdict.rejected);
    assert!(verdict.frequency_message.starts_with("suspicious behaviour"));

    Ok(())
}

#[tokio::test]
async fn test_router_serves_any_storage_backend() -> Result<()> {
    let storage = Arc::new(AuditedStorage::default());
    let router = create_router_with(storage.clone())?;

    let (status, _) = post_json(&router, "/transactions", &transaction(1, 8, "2019-12-01 10:00:00", 10.0)).await?;
    let (_, body) = get(&router, "/users/8/transactions").await?;
    let history: Vec<HistoryEntry> = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(storage.appends.load(Ordering::SeqCst), 1);
    assert_eq!(history.len(), 1);

    Ok(())
}
