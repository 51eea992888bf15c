//! Reference data models for the advertising catalog.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.
//! Price tables and multipliers live in JSONB columns.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::errors::ConfigurationError;
use super::MAX_AREAS;

/// How an advert is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Fixed,
    Subscription,
    Bogof,
    Leafleting,
}

impl PricingModel {
    pub fn as_str(self) -> &'static str {
        match self {
            PricingModel::Fixed => "fixed",
            PricingModel::Subscription => "subscription",
            PricingModel::Bogof => "bogof",
            PricingModel::Leafleting => "leafleting",
        }
    }

    /// Subscription and BOGOF bookings draw from the month-based duration list.
    pub fn uses_subscription_durations(self) -> bool {
        matches!(self, PricingModel::Subscription | PricingModel::Bogof)
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution area from ad_areas
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    /// Homes reached per issue
    #[sqlx(try_from = "i32")]
    pub circulation: u32,
    /// Ad size id -> multiplier on this area's share of the price
    #[sqlx(json)]
    #[serde(default)]
    pub price_multipliers: HashMap<Uuid, Decimal>,
}

impl Area {
    pub fn multiplier_for(&self, ad_size_id: Uuid) -> Decimal {
        self.price_multipliers
            .get(&ad_size_id)
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

/// Ad size from ad_sizes
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AdSize {
    pub id: Uuid,
    pub name: String,
    pub dimensions: String,
    pub base_price_per_area: Decimal,
    pub base_price_per_month: Decimal,
    /// Area count ("1".."14") -> price for the fixed model
    #[sqlx(json)]
    pub fixed_pricing_per_issue: BTreeMap<String, Decimal>,
    /// Area count ("1".."14") -> price for subscription and BOGOF
    #[sqlx(json)]
    pub subscription_pricing_per_issue: BTreeMap<String, Decimal>,
    #[sqlx(json)]
    pub available_for: Vec<PricingModel>,
}

impl AdSize {
    pub fn is_available_for(&self, model: PricingModel) -> bool {
        self.available_for.contains(&model)
    }

    /// The bulk price table for a model, if the model is table-priced.
    pub fn price_table(&self, model: PricingModel) -> Option<&BTreeMap<String, Decimal>> {
        match model {
            PricingModel::Fixed => Some(&self.fixed_pricing_per_issue),
            PricingModel::Subscription | PricingModel::Bogof => {
                Some(&self.subscription_pricing_per_issue)
            }
            PricingModel::Leafleting => None,
        }
    }

    /// Look up the holistic price for `area_count` areas.
    ///
    /// The table value already covers every selected area; it is never
    /// multiplied by the count. Counts outside 1..=14 fail rather than
    /// extrapolate.
    pub fn table_price(
        &self,
        model: PricingModel,
        area_count: usize,
    ) -> Result<Decimal, ConfigurationError> {
        if area_count == 0 || area_count > MAX_AREAS {
            return Err(ConfigurationError::AreaCountOutOfRange {
                count: area_count,
                max: MAX_AREAS,
            });
        }

        let missing = || ConfigurationError::MissingPriceEntry {
            ad_size: self.name.clone(),
            model,
            count: area_count,
        };

        let price = self
            .price_table(model)
            .and_then(|table| table.get(&area_count.to_string()))
            .copied()
            .ok_or_else(missing)?;

        if price.is_sign_negative() {
            return Err(ConfigurationError::NegativePriceEntry {
                ad_size: self.name.clone(),
                model,
                count: area_count,
            });
        }

        Ok(price)
    }
}

/// Booking length from ad_durations
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Duration {
    pub id: Uuid,
    pub name: String,
    /// Issue count (fixed) or month count (subscription)
    #[sqlx(try_from = "i32")]
    pub duration_value: u32,
    pub discount_percentage: Decimal,
    pub is_subscription: bool,
}

impl Duration {
    /// `1 - discount/100`
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.discount_percentage / Decimal::ONE_HUNDRED
    }
}

/// Volume discount tier from ad_volume_discounts
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct VolumeDiscountTier {
    pub id: Uuid,
    #[sqlx(try_from = "i32")]
    pub min_areas: u32,
    #[sqlx(try_from = "i32")]
    pub max_areas: u32,
    pub discount_percentage: Decimal,
}

impl VolumeDiscountTier {
    pub fn contains(&self, area_count: usize) -> bool {
        let count = area_count as u64;
        u64::from(self.min_areas) <= count && count <= u64::from(self.max_areas)
    }
}

/// Payment option from payment_options
///
/// `option_type` is kept raw: an unrecognised value must still load so the
/// payment calculator can apply its conservative fallback.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PaymentOption {
    pub id: Uuid,
    pub option_type: String,
    /// Encodes the instalment count for lump sums, e.g. "6 Month Payment"
    pub display_name: String,
    #[sqlx(try_from = "i32")]
    pub minimum_payments: u32,
    #[serde(default)]
    pub discount_percentage: Decimal,
}
