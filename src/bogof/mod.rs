//! Buy-one-get-one-free eligibility.
//!
//! Limits each customer to one paid BOGOF booking. The checker consults the
//! booking history through the [`BookingHistory`] seam so it can run against
//! Postgres in production and a mock in tests.

pub mod eligibility;
pub mod history;
pub mod models;
pub mod routes;

pub use eligibility::EligibilityChecker;
pub use history::{BookingHistory, HistoryError, PgBookingHistory};
pub use models::{BogofIdentity, EligibilityResult, IdentitySignal, IneligibleReason};
pub use routes::router;
