//! Payment amount calculation.
//!
//! Splits a quote into the collections a payment option implies and works
//! out what to charge now. Unknown options fail closed to the full amount.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;

pub use calculators::{allocate, build_schedule, calculate_payment_amount, instalment_count};
pub use models::{Instalment, PaymentOptionType, PaymentSchedule};
pub use routes::router;
