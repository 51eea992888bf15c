//! Quote persistence.
//!
//! A quote stores the typed selection and the breakdown it produced. Status
//! changes after creation belong to the booking and payment flows.

pub mod models;
pub mod queries;
pub mod requests;
pub mod routes;

pub use models::{NewQuote, QuoteRecord};
pub use routes::router;
