//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::catalog::ConfigurationError;
use crate::pricing::{PricingError, SelectionError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Configuration(e) => AppError::Configuration(e),
            PricingError::Selection(e) => AppError::InvalidSelection(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Catalog and infrastructure detail stays in the logs
        let (status, error_type, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", "Not found".to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Configuration(e) => {
                tracing::error!("Catalog configuration error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "pricing_unavailable",
                    "Pricing is temporarily unavailable".to_string(),
                )
            }
            AppError::InvalidSelection(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_selection",
                e.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
        };

        let body = json!({
            "error_type": error_type,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
