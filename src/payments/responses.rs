//! Response DTOs for payment API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::PaymentSchedule;

/// Response for payment amount calculation
#[derive(Debug, Serialize)]
pub struct PaymentAmountResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub formatted_amount: String,
    pub schedule: PaymentSchedule,
}
