//! Payment schedule types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recognised `payment_options.option_type` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOptionType {
    Monthly,
    LumpSum,
}

impl PaymentOptionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(PaymentOptionType::Monthly),
            "lump_sum" => Some(PaymentOptionType::LumpSum),
            _ => None,
        }
    }
}

/// One collection in a payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instalment {
    /// 1-based
    pub sequence: u32,
    /// Months of the booking this payment covers
    pub months_covered: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Every payment a customer will make for a quote under one option.
///
/// The instalments always sum exactly to `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    /// `None` when the option could not be used and the full amount is due
    pub option_type: Option<PaymentOptionType>,
    pub fallback: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub design_fee: Decimal,
    pub instalments: Vec<Instalment>,
}

impl PaymentSchedule {
    /// Amount to collect now.
    pub fn current_charge(&self) -> Decimal {
        self.instalments
            .first()
            .map(|i| i.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn instalment_total(&self) -> Decimal {
        self.instalments.iter().map(|i| i.amount).sum()
    }
}
