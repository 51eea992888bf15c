//! Database queries for the advertising catalog.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::AppError;

use super::models::{AdSize, Area, Duration, PaymentOption, VolumeDiscountTier};
use super::Catalog;

/// Get all active distribution areas
pub async fn get_areas(pool: &PgPool) -> Result<Vec<Area>, AppError> {
    let areas = sqlx::query_as::<_, Area>(
        r#"
        SELECT id, name, circulation, price_multipliers
        FROM ad_areas
        WHERE is_active = true
        ORDER BY sort_order, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(areas)
}

/// Get all active ad sizes with their price tables
pub async fn get_ad_sizes(pool: &PgPool) -> Result<Vec<AdSize>, AppError> {
    let sizes = sqlx::query_as::<_, AdSize>(
        r#"
        SELECT
            id, name, dimensions,
            base_price_per_area, base_price_per_month,
            fixed_pricing_per_issue, subscription_pricing_per_issue,
            available_for
        FROM ad_sizes
        WHERE is_active = true
        ORDER BY sort_order, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sizes)
}

/// Get active durations, either the issue-count list or the month-count list
pub async fn get_durations(pool: &PgPool, subscription: bool) -> Result<Vec<Duration>, AppError> {
    let durations = sqlx::query_as::<_, Duration>(
        r#"
        SELECT id, name, duration_value, discount_percentage, is_subscription
        FROM ad_durations
        WHERE is_active = true
          AND is_subscription = $1
        ORDER BY duration_value
        "#,
    )
    .bind(subscription)
    .fetch_all(pool)
    .await?;

    Ok(durations)
}

/// Get volume discount tiers ordered by range
pub async fn get_volume_discounts(pool: &PgPool) -> Result<Vec<VolumeDiscountTier>, AppError> {
    let tiers = sqlx::query_as::<_, VolumeDiscountTier>(
        r#"
        SELECT id, min_areas, max_areas, discount_percentage
        FROM ad_volume_discounts
        WHERE is_active = true
        ORDER BY min_areas
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tiers)
}

/// Get active payment options
pub async fn get_payment_options(pool: &PgPool) -> Result<Vec<PaymentOption>, AppError> {
    let options = sqlx::query_as::<_, PaymentOption>(
        r#"
        SELECT
            id, option_type, display_name, minimum_payments,
            COALESCE(discount_percentage, 0) AS discount_percentage
        FROM payment_options
        WHERE is_active = true
        ORDER BY sort_order, display_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(options)
}

/// Load the full catalog snapshot (for cache warming)
pub async fn load_catalog(pool: &PgPool, design_fee: Decimal) -> Result<Catalog, AppError> {
    let (areas, ad_sizes, durations, subscription_durations, volume_discounts, payment_options) =
        tokio::try_join!(
            get_areas(pool),
            get_ad_sizes(pool),
            get_durations(pool, false),
            get_durations(pool, true),
            get_volume_discounts(pool),
            get_payment_options(pool),
        )?;

    Ok(Catalog {
        areas,
        ad_sizes,
        durations,
        subscription_durations,
        volume_discounts,
        payment_options,
        design_fee,
    })
}
