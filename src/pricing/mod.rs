//! Advertising price calculation engine.
//!
//! Turns a [`Selection`] plus the loaded catalog into a full
//! [`PricingBreakdown`]. The engine is pure; `services` wires it to the
//! cached catalog and `routes` exposes it over HTTP.

pub mod calculators;
pub mod models;
pub mod responses;
pub mod routes;
pub mod selection;
pub mod services;

use thiserror::Error;

use crate::catalog::ConfigurationError;

// Re-export commonly used items
pub use calculators::{calculate_advertising_price, format_price, round_money};
pub use models::{AreaLineItem, PricingBreakdown};
pub use routes::router;
pub use selection::{Selection, SelectionError};

/// Why a selection could not be priced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}
