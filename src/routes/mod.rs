//! HTTP surface

pub mod admin;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{bogof, payments, pricing, quotes, AppState};

/// All API routes, still waiting for state
pub fn api() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .merge(bogof::router())
        .merge(payments::router())
        .merge(quotes::router())
        .merge(admin::router())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
