//! In-memory caching using moka
//!
//! Holds the advertising catalog snapshot so quotes never wait on five
//! reference-data queries. The catalog changes only through admin edits, so a
//! TTL plus explicit invalidation is enough.

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::catalog::{queries, Catalog};
use crate::error::AppError;

const CATALOG_KEY: &str = "catalog";

/// Application cache holding the catalog snapshot
#[derive(Clone)]
pub struct AppCache {
    /// Catalog (singleton)
    pub catalog: Cache<&'static str, Arc<Catalog>>,
}

impl AppCache {
    /// Create a new cache instance with the given catalog TTL
    pub fn new(catalog_ttl: Duration) -> Self {
        Self {
            catalog: Cache::builder()
                .max_capacity(1)
                .time_to_live(catalog_ttl)
                .build(),
        }
    }

    /// Get the cached catalog, loading it from the database on a miss
    pub async fn catalog(
        &self,
        db: &PgPool,
        design_fee: Decimal,
    ) -> Result<Arc<Catalog>, AppError> {
        if let Some(cached) = self.catalog.get(CATALOG_KEY).await {
            tracing::debug!("Cache HIT for catalog");
            return Ok(cached);
        }

        tracing::debug!("Cache MISS for catalog");
        let catalog = Arc::new(queries::load_catalog(db, design_fee).await?);
        log_integrity_issues(&catalog);
        self.catalog.insert(CATALOG_KEY, catalog.clone()).await;

        Ok(catalog)
    }

    /// Replace the cached catalog
    pub async fn insert_catalog(&self, catalog: Catalog) {
        self.catalog.insert(CATALOG_KEY, Arc::new(catalog)).await;
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            catalog_cached: self.catalog.contains_key(CATALOG_KEY),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.catalog.invalidate_all();
        info!("All caches invalidated");
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, design_fee: Decimal) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db, design_fee).await;
    }
}

async fn warm_cache(cache: &AppCache, db: &PgPool, design_fee: Decimal) {
    info!("Starting cache warm-up...");

    match queries::load_catalog(db, design_fee).await {
        Ok(catalog) => {
            log_integrity_issues(&catalog);
            cache.insert_catalog(catalog).await;
        }
        Err(e) => warn!("Failed to warm catalog cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

fn log_integrity_issues(catalog: &Catalog) {
    for issue in catalog.validate() {
        warn!("Catalog integrity: {}", issue);
    }
}
