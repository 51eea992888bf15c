//! Admin endpoints for the catalog cache

use axum::{extract::State, routing::{get, post}, Json, Router};

use crate::cache::CacheStats;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/catalog/invalidate", post(invalidate))
        .route("/api/admin/cache/stats", get(stats))
}

/// Drop the cached catalog so the next quote reloads it
async fn invalidate(State(state): State<AppState>) -> Json<CacheStats> {
    state.cache.invalidate_all();
    tracing::info!("Catalog cache invalidated by admin request");
    Json(state.cache.stats())
}

async fn stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
