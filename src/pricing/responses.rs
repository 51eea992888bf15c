//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use super::models::PricingBreakdown;

/// Response for price calculation; `breakdown` is null while the selection
/// is incomplete
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub breakdown: Option<PricingBreakdown>,
    /// Display string for `final_total`, e.g. "£855.00"
    pub formatted_total: Option<String>,
}
