//! Request DTOs for payment API endpoints.

use serde::Deserialize;
use uuid::Uuid;

use crate::pricing::Selection;

/// Request to work out the amount due now.
///
/// The price is recomputed from the selection; client totals are never
/// trusted.
#[derive(Debug, Deserialize)]
pub struct PaymentAmountRequest {
    pub selection: Selection,
    pub payment_option_id: Uuid,
}
