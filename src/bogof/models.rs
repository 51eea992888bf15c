//! Identity and eligibility types for BOGOF checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Identity signals supplied by the booking flow.
///
/// Passed explicitly on every check; nothing is read from session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BogofIdentity {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub ip_hash: Option<String>,
    #[serde(default)]
    pub device_fingerprint: Option<String>,
}

impl BogofIdentity {
    /// Present, normalised signals for the hard-block layers, in check order.
    pub fn hard_signals(&self) -> Vec<IdentitySignal> {
        let mut signals = Vec::with_capacity(3);
        if let Some(id) = self.user_id {
            signals.push(IdentitySignal::UserId(id));
        }
        if let Some(email) = self.email.as_deref().and_then(normalize_email) {
            signals.push(IdentitySignal::Email(email));
        }
        if let Some(phone) = self.phone.as_deref().and_then(normalize_phone) {
            signals.push(IdentitySignal::Phone(phone));
        }
        signals
    }

    pub fn ip_signal(&self) -> Option<IdentitySignal> {
        non_blank(self.ip_hash.as_deref()).map(IdentitySignal::IpHash)
    }

    pub fn device_signal(&self) -> Option<IdentitySignal> {
        non_blank(self.device_fingerprint.as_deref()).map(IdentitySignal::DeviceFingerprint)
    }
}

/// One identity key to search booking history by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySignal {
    UserId(Uuid),
    Email(String),
    Phone(String),
    IpHash(String),
    DeviceFingerprint(String),
}

impl IdentitySignal {
    /// Human-readable name used in warnings and logs
    pub fn label(&self) -> &'static str {
        match self {
            IdentitySignal::UserId(_) => "account",
            IdentitySignal::Email(_) => "email address",
            IdentitySignal::Phone(_) => "phone number",
            IdentitySignal::IpHash(_) => "IP address",
            IdentitySignal::DeviceFingerprint(_) => "device",
        }
    }

    /// The denial a match on this signal produces; soft signals never deny.
    pub fn denial_reason(&self) -> Option<IneligibleReason> {
        match self {
            IdentitySignal::UserId(_) => Some(IneligibleReason::AccountAlreadyUsed),
            IdentitySignal::Email(_) => Some(IneligibleReason::EmailAlreadyUsed),
            IdentitySignal::Phone(_) => Some(IneligibleReason::PhoneAlreadyUsed),
            IdentitySignal::IpHash(_) | IdentitySignal::DeviceFingerprint(_) => None,
        }
    }
}

/// A prior paid BOGOF booking
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookingRef {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Why a BOGOF booking was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    AccountAlreadyUsed,
    EmailAlreadyUsed,
    PhoneAlreadyUsed,
}

impl IneligibleReason {
    pub fn message(self) -> &'static str {
        match self {
            IneligibleReason::AccountAlreadyUsed => {
                "This account has already used the Buy One Get One Free offer."
            }
            IneligibleReason::EmailAlreadyUsed => {
                "This email address has already been used for a Buy One Get One Free booking."
            }
            IneligibleReason::PhoneAlreadyUsed => {
                "This phone number has already been used for a Buy One Get One Free booking."
            }
        }
    }
}

/// Outcome of an eligibility check.
///
/// Denial is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibleReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub warnings: Vec<String>,
}

impl EligibilityResult {
    pub fn eligible(warnings: Vec<String>) -> Self {
        Self {
            is_eligible: true,
            reason: None,
            message: None,
            warnings,
        }
    }

    pub fn denied(reason: IneligibleReason, warnings: Vec<String>) -> Self {
        Self {
            is_eligible: false,
            reason: Some(reason),
            message: Some(reason.message().to_string()),
            warnings,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn normalize_email(email: &str) -> Option<String> {
    non_blank(Some(email)).map(|e| e.to_lowercase())
}

/// Keep digits and a leading '+' so "0161 496 0000" matches "01614960000".
fn normalize_phone(phone: &str) -> Option<String> {
    let trimmed = phone.trim();
    let mut normalized: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if normalized.is_empty() {
        return None;
    }
    if trimmed.starts_with('+') {
        normalized.insert(0, '+');
    }
    Some(normalized)
}
