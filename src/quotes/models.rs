//! Quote models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::{PricingBreakdown, Selection};

/// Quote from ad_quotes
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteRecord {
    pub id: Uuid,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub business_name: Option<String>,
    #[sqlx(json)]
    pub selections: Selection,
    #[sqlx(json)]
    pub pricing: PricingBreakdown,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced quote ready to insert
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub business_name: Option<String>,
    pub selection: Selection,
    pub pricing: PricingBreakdown,
}
