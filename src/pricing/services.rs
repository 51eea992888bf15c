//! Pricing service functions with cache access.
//!
//! Resolve the catalog snapshot from the cache, then run the pure engine.

use tracing::warn;

use crate::error::AppError;
use crate::AppState;

use super::calculators::calculate_advertising_price;
use super::models::PricingBreakdown;
use super::selection::Selection;
use super::PricingError;

/// Price a selection against the cached catalog.
///
/// `Ok(None)` means the selection is still incomplete.
pub async fn price_selection(
    state: &AppState,
    selection: &Selection,
) -> Result<Option<PricingBreakdown>, AppError> {
    let catalog = state
        .cache
        .catalog(&state.db, state.config.design_fee)
        .await?;

    calculate_advertising_price(selection, &catalog).map_err(|e| {
        if let PricingError::Configuration(detail) = &e {
            warn!(
                model = %selection.pricing_model,
                ad_size = ?selection.ad_size_id,
                duration = ?selection.duration_id,
                areas = selection.area_ids.len(),
                "Selection could not be priced: {}",
                detail
            );
        }
        AppError::from(e)
    })
}

/// Price a selection that must be complete.
pub async fn require_price(
    state: &AppState,
    selection: &Selection,
) -> Result<PricingBreakdown, AppError> {
    price_selection(state, selection)
        .await?
        .ok_or_else(|| AppError::BadRequest("Selection is incomplete".to_string()))
}
