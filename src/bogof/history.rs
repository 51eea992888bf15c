//! Booking history lookups for BOGOF checks.
//!
//! The history is read-only here; the booking flow appends to it elsewhere.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use thiserror::Error;

use super::models::{BookingRef, IdentitySignal};

/// A history lookup that could not complete.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("booking history lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),

    #[error("booking history lookup timed out after {0:?}")]
    TimedOut(Duration),
}

#[automock]
#[async_trait]
pub trait BookingHistory: Send + Sync {
    /// Most recent paid BOGOF booking matching the signal.
    async fn latest_paid_bogof(
        &self,
        signal: &IdentitySignal,
    ) -> Result<Option<BookingRef>, HistoryError>;

    /// Up to `limit` paid BOGOF bookings matching the signal, newest first.
    async fn paid_bogof_bookings(
        &self,
        signal: &IdentitySignal,
        limit: i64,
    ) -> Result<Vec<BookingRef>, HistoryError>;
}

/// Booking history backed by the bookings table
#[derive(Debug, Clone)]
pub struct PgBookingHistory {
    db: PgPool,
}

impl PgBookingHistory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// WHERE fragment for a signal; always a static string, values are bound.
fn signal_filter(signal: &IdentitySignal) -> &'static str {
    match signal {
        IdentitySignal::UserId(_) => "user_id = $1",
        IdentitySignal::Email(_) => "LOWER(TRIM(email)) = $1",
        IdentitySignal::Phone(_) => "REGEXP_REPLACE(phone, '[^0-9+]', '', 'g') = $1",
        IdentitySignal::IpHash(_) => "ip_hash = $1",
        IdentitySignal::DeviceFingerprint(_) => "device_fingerprint = $1",
    }
}

#[async_trait]
impl BookingHistory for PgBookingHistory {
    async fn latest_paid_bogof(
        &self,
        signal: &IdentitySignal,
    ) -> Result<Option<BookingRef>, HistoryError> {
        Ok(self
            .paid_bogof_bookings(signal, 1)
            .await?
            .into_iter()
            .next())
    }

    async fn paid_bogof_bookings(
        &self,
        signal: &IdentitySignal,
        limit: i64,
    ) -> Result<Vec<BookingRef>, HistoryError> {
        let sql = format!(
            r#"
            SELECT id, created_at
            FROM bookings
            WHERE pricing_model = 'bogof'
              AND payment_status = 'paid'
              AND {}
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            signal_filter(signal)
        );

        let query = sqlx::query_as::<_, BookingRef>(&sql);
        let query = match signal {
            IdentitySignal::UserId(id) => query.bind(*id),
            IdentitySignal::Email(value)
            | IdentitySignal::Phone(value)
            | IdentitySignal::IpHash(value)
            | IdentitySignal::DeviceFingerprint(value) => query.bind(value.as_str()),
        };

        let bookings = query.bind(limit).fetch_all(&self.db).await?;

        Ok(bookings)
    }
}
