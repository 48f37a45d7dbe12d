//! HTTP routing for the stub audit endpoint

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use perfaudit::audit::endpoint::{self, AUDIT_PATH};
use perfaudit::audit::MetricSource;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MetricSource>,
    /// Simulated audit latency applied to every POST
    pub delay: Duration,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(AUDIT_PATH, post(run_audit).get(describe))
        .with_state(state)
}

async fn run_audit(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    tokio::time::sleep(state.delay).await;

    let response = endpoint::handle_audit(state.source.as_ref(), &body);
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

async fn describe() -> Json<Value> {
    Json(endpoint::capabilities())
}
