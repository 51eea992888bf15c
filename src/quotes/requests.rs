//! Request DTOs for quote endpoints.

use serde::Deserialize;

use crate::error::AppError;
use crate::pricing::Selection;

/// Request to price and save a quote
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub contact_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    pub selection: Selection,
}

impl CreateQuoteRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.contact_name.trim().is_empty() {
            return Err(AppError::BadRequest("contact_name is required".to_string()));
        }
        if !self.contact_email.contains('@') {
            return Err(AppError::BadRequest(
                "contact_email must be an email address".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateQuoteRequest {
        let json = serde_json::json!({
            "contact_name": name,
            "contact_email": email,
            "selection": { "pricing_model": "fixed" },
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_validate_contact() {
        assert!(request("Jo Bloggs", "jo@example.com").validate().is_ok());
        assert!(matches!(
            request(" ", "jo@example.com").validate(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            request("Jo", "not-an-email").validate(),
            Err(AppError::BadRequest(_))
        ));
    }
}
