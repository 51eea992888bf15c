//! Advertising catalog: areas, ad sizes, durations, volume tiers and payment
//! options.
//!
//! The catalog is read-only reference data. It is loaded in full before any
//! calculation runs; the engines never fetch lazily.

pub mod errors;
pub mod models;
pub mod queries;

#[cfg(test)]
pub(crate) mod fixtures;

use rust_decimal::Decimal;
use uuid::Uuid;

pub use errors::ConfigurationError;
pub use models::{AdSize, Area, Duration, PaymentOption, PricingModel, VolumeDiscountTier};

/// Largest area count the price tables model.
pub const MAX_AREAS: usize = 14;

/// A fully loaded snapshot of the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub areas: Vec<Area>,
    pub ad_sizes: Vec<AdSize>,
    /// Issue-count durations (fixed and leafleting)
    pub durations: Vec<Duration>,
    /// Month-count durations (subscription and BOGOF)
    pub subscription_durations: Vec<Duration>,
    pub volume_discounts: Vec<VolumeDiscountTier>,
    pub payment_options: Vec<PaymentOption>,
    /// Flat fee for professional ad design
    pub design_fee: Decimal,
}

impl Catalog {
    pub fn area(&self, id: Uuid) -> Result<&Area, ConfigurationError> {
        self.areas
            .iter()
            .find(|a| a.id == id)
            .ok_or(ConfigurationError::UnknownArea(id))
    }

    pub fn ad_size(&self, id: Uuid) -> Result<&AdSize, ConfigurationError> {
        self.ad_sizes
            .iter()
            .find(|s| s.id == id)
            .ok_or(ConfigurationError::UnknownAdSize(id))
    }

    /// Resolve a duration from the list that matches the pricing model.
    ///
    /// A fixed duration id used with a subscription booking (or the reverse)
    /// is reported as unknown.
    pub fn duration_for(
        &self,
        model: PricingModel,
        id: Uuid,
    ) -> Result<&Duration, ConfigurationError> {
        let list = if model.uses_subscription_durations() {
            &self.subscription_durations
        } else {
            &self.durations
        };

        list.iter()
            .find(|d| d.id == id)
            .ok_or(ConfigurationError::UnknownDuration { id, model })
    }

    /// The single tier whose inclusive range contains `area_count`.
    pub fn volume_tier(
        &self,
        area_count: usize,
    ) -> Result<&VolumeDiscountTier, ConfigurationError> {
        let mut matching = self
            .volume_discounts
            .iter()
            .filter(|t| t.contains(area_count));

        let tier = matching
            .next()
            .ok_or(ConfigurationError::NoVolumeTier(area_count))?;

        if matching.next().is_some() {
            return Err(ConfigurationError::OverlappingVolumeTiers(area_count));
        }

        Ok(tier)
    }

    /// Check catalog integrity, returning every problem found.
    ///
    /// Every table an ad size is available for must have entries for 1..=14
    /// that are non-negative, and the volume tiers must cover 1..=14 exactly
    /// once each.
    pub fn validate(&self) -> Vec<ConfigurationError> {
        let mut issues = Vec::new();

        for area in &self.areas {
            if area.circulation == 0 {
                issues.push(ConfigurationError::InvalidCirculation(area.name.clone()));
            }
        }

        for size in &self.ad_sizes {
            for &model in &size.available_for {
                if size.price_table(model).is_none() {
                    continue;
                }
                for count in 1..=MAX_AREAS {
                    if let Err(e) = size.table_price(model, count) {
                        issues.push(e);
                    }
                }
            }
        }

        for duration in self.durations.iter().chain(&self.subscription_durations) {
            if duration.discount_percentage < Decimal::ZERO
                || duration.discount_percentage > Decimal::ONE_HUNDRED
            {
                issues.push(ConfigurationError::InvalidDiscount(duration.name.clone()));
            }
        }

        for count in 1..=MAX_AREAS {
            if let Err(e) = self.volume_tier(count) {
                issues.push(e);
            }
        }

        issues
    }
}
