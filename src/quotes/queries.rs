//! Database queries for quotes

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{NewQuote, QuoteRecord};

/// Insert a new quote with status 'pending'
pub async fn insert_quote(pool: &PgPool, quote: &NewQuote) -> Result<QuoteRecord> {
    let record = sqlx::query_as::<_, QuoteRecord>(
        r#"
        INSERT INTO ad_quotes (
            id, contact_name, contact_email, contact_phone, business_name,
            selections, pricing, payment_status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
        RETURNING
            id, contact_name, contact_email, contact_phone, business_name,
            selections, pricing, payment_status, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&quote.contact_name)
    .bind(&quote.contact_email)
    .bind(&quote.contact_phone)
    .bind(&quote.business_name)
    .bind(Json(&quote.selection))
    .bind(Json(&quote.pricing))
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get a quote by id
pub async fn get_quote(pool: &PgPool, id: Uuid) -> Result<QuoteRecord> {
    let record = sqlx::query_as::<_, QuoteRecord>(
        r#"
        SELECT
            id, contact_name, contact_email, contact_phone, business_name,
            selections, pricing, payment_status, created_at, updated_at
        FROM ad_quotes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(record)
}
