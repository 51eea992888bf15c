//! Core pricing calculation functions.
//!
//! Pure functions for quote math - no database access. Nothing is rounded
//! here; rounding happens only when a price is displayed or split into
//! instalments.

use rust_decimal::prelude::*;

use crate::catalog::{Area, Catalog, ConfigurationError, PricingModel, MAX_AREAS};

use super::models::{AreaLineItem, PricingBreakdown};
use super::selection::Selection;
use super::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use adbook_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Render an amount for display, e.g. `£855.00`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use adbook_pricing::pricing::format_price;
///
/// assert_eq!(format_price(dec!(855), "£"), "£855.00");
/// ```
pub fn format_price(amount: Decimal, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, round_money(amount, 2))
}

/// Price a selection against the catalog.
///
/// Returns `Ok(None)` while the selection is still incomplete (no areas, ad
/// size or duration chosen yet). Any id the catalog cannot resolve, or an
/// area count outside 1..=14, is a [`ConfigurationError`]; no default price
/// is ever substituted.
///
/// The per-area-count table already prices the whole booking, so the
/// duration's issue or month count is never applied as a multiplier; only
/// its discount percentage is. Volume discount is taken first, then the
/// duration discount, then the design fee is added undiscounted.
pub fn calculate_advertising_price(
    selection: &Selection,
    catalog: &Catalog,
) -> Result<Option<PricingBreakdown>, PricingError> {
    let Some((ad_size_id, duration_id)) = selection.choices() else {
        return Ok(None);
    };

    selection.validate()?;

    let model = selection.pricing_model;
    let ad_size = catalog.ad_size(ad_size_id)?;
    if !ad_size.is_available_for(model) {
        return Err(ConfigurationError::AdSizeUnavailable {
            ad_size: ad_size.name.clone(),
            model,
        }
        .into());
    }
    let duration = catalog.duration_for(model, duration_id)?;

    let paid_areas = resolve_areas(catalog, &selection.area_ids)?;
    let free_areas = resolve_areas(catalog, &selection.free_area_ids)?;

    let paid_count = paid_areas.len();
    if paid_count > MAX_AREAS {
        return Err(ConfigurationError::AreaCountOutOfRange {
            count: paid_count,
            max: MAX_AREAS,
        }
        .into());
    }

    let base_total = match model {
        PricingModel::Leafleting => ad_size.base_price_per_area * Decimal::from(paid_count),
        _ => ad_size.table_price(model, paid_count)?,
    };

    // Each paid area carries an equal share of the table price, scaled by
    // its multiplier for this ad size.
    let count = Decimal::from(paid_count);
    let mut area_breakdown = Vec::with_capacity(paid_count + free_areas.len());
    let mut multiplier_sum = Decimal::ZERO;

    for area in &paid_areas {
        let multiplier = area.multiplier_for(ad_size.id);
        multiplier_sum += multiplier;
        area_breakdown.push(AreaLineItem {
            area_id: area.id,
            area_name: area.name.clone(),
            circulation: area.circulation,
            is_free: false,
            multiplier,
            price: base_total * multiplier / count,
        });
    }
    for area in &free_areas {
        area_breakdown.push(AreaLineItem {
            area_id: area.id,
            area_name: area.name.clone(),
            circulation: area.circulation,
            is_free: true,
            multiplier: Decimal::ZERO,
            price: Decimal::ZERO,
        });
    }

    let subtotal = base_total * (multiplier_sum / count);

    let tier = catalog.volume_tier(paid_count)?;
    let volume_discount = subtotal * tier.discount_percentage / Decimal::ONE_HUNDRED;
    let subtotal_after_volume = subtotal - volume_discount;

    let duration_multiplier = duration.multiplier();
    let total_before_design = (subtotal_after_volume * duration_multiplier).max(Decimal::ZERO);
    let duration_discount = subtotal_after_volume - total_before_design;

    let design_fee = if selection.needs_design {
        catalog.design_fee
    } else {
        Decimal::ZERO
    };
    let final_total = total_before_design + design_fee;

    let total_circulation: u64 = paid_areas
        .iter()
        .chain(&free_areas)
        .map(|a| u64::from(a.circulation))
        .sum();

    let cost_per_insert = (total_circulation > 0)
        .then(|| total_before_design / Decimal::from(total_circulation));

    Ok(Some(PricingBreakdown {
        pricing_model: model,
        paid_area_count: paid_count,
        free_area_count: free_areas.len(),
        base_total,
        subtotal,
        volume_discount_percent: tier.discount_percentage,
        volume_discount,
        subtotal_after_volume,
        duration_discount_percent: duration.discount_percentage,
        duration_multiplier,
        duration_discount,
        total_before_design,
        design_fee,
        final_total,
        total_circulation,
        cost_per_insert,
        duration_value: duration.duration_value,
        area_breakdown,
    }))
}

fn resolve_areas<'a>(
    catalog: &'a Catalog,
    ids: &[uuid::Uuid],
) -> Result<Vec<&'a Area>, ConfigurationError> {
    ids.iter().map(|id| catalog.area(*id)).collect()
}
