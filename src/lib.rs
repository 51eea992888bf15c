//! Advertising quote engine for a community magazine directory.
//!
//! Prices print and leaflet advertising from a database-held catalog, checks
//! BOGOF offer eligibility against booking history, and works out what to
//! charge under each payment option.

pub mod bogof;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod payload;
pub mod payments;
pub mod pricing;
pub mod quotes;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::cache::AppCache;
use crate::config::Config;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

/// Build the application router without middleware layers
pub fn app(state: AppState) -> Router {
    routes::api().with_state(state)
}
