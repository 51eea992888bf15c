//! Catalog integrity errors.

use thiserror::Error;
use uuid::Uuid;

use super::models::PricingModel;

/// A selection referenced reference data the catalog cannot satisfy.
///
/// These indicate a catalog or caller bug, never a user mistake, and must be
/// surfaced rather than replaced with a default price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("area {0} is not in the catalog")]
    UnknownArea(Uuid),

    #[error("ad size {0} is not in the catalog")]
    UnknownAdSize(Uuid),

    #[error("duration {id} is not in the {model} duration list")]
    UnknownDuration { id: Uuid, model: PricingModel },

    #[error("ad size '{ad_size}' is not available for {model} bookings")]
    AdSizeUnavailable {
        ad_size: String,
        model: PricingModel,
    },

    #[error("{count} areas selected but only 1..={max} are priced")]
    AreaCountOutOfRange { count: usize, max: usize },

    #[error("ad size '{ad_size}' has no {model} price for {count} areas")]
    MissingPriceEntry {
        ad_size: String,
        model: PricingModel,
        count: usize,
    },

    #[error("ad size '{ad_size}' has a negative {model} price for {count} areas")]
    NegativePriceEntry {
        ad_size: String,
        model: PricingModel,
        count: usize,
    },

    #[error("no volume discount tier covers {0} areas")]
    NoVolumeTier(usize),

    #[error("{0} areas are covered by more than one volume discount tier")]
    OverlappingVolumeTiers(usize),

    #[error("area '{0}' has a non-positive circulation")]
    InvalidCirculation(String),

    #[error("'{0}' has a discount outside 0..=100 percent")]
    InvalidDiscount(String),
}
