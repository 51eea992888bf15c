//! Pricing breakdown produced by the engine.
//!
//! Money fields serialize as plain JSON numbers so the breakdown can be stored
//! alongside quotes and forwarded in webhook payloads unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::PricingModel;

/// One area's share of the booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLineItem {
    pub area_id: Uuid,
    pub area_name: String,
    pub circulation: u32,
    /// Free BOGOF areas carry a zero price
    pub is_free: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Full itemisation of a quote.
///
/// `final_total = (subtotal - volume_discount) * duration_multiplier + design_fee`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub pricing_model: PricingModel,
    pub paid_area_count: usize,
    pub free_area_count: usize,
    /// Table price for the paid area count (linear for leafleting)
    #[serde(with = "rust_decimal::serde::float")]
    pub base_total: Decimal,
    /// Base total after per-area multipliers
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal_after_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_discount: Decimal,
    /// Amount subject to instalment splitting
    #[serde(with = "rust_decimal::serde::float")]
    pub total_before_design: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub design_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_total: Decimal,
    /// Paid and free areas
    pub total_circulation: u64,
    /// Price per home reached, before design
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub cost_per_insert: Option<Decimal>,
    pub duration_value: u32,
    #[serde(default)]
    pub area_breakdown: Vec<AreaLineItem>,
}
