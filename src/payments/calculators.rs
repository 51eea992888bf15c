//! Payment amount calculation.
//!
//! Pure functions - no database access. Splits a quoted total into the
//! instalments implied by a payment option.
//!
//! Policy:
//! - The design fee is collected in full with the first instalment.
//! - Instalments are rounded to pennies and any remainder is spread a penny
//!   at a time from the first instalment, so the schedule sums exactly to the
//!   option's total obligation.
//! - An unknown option, an unrecognised option type or a lump sum whose
//!   display name carries no instalment count falls back to charging the
//!   whole undiscounted amount at once. Never zero, never an error.

use rust_decimal::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{PaymentOption, PricingModel};
use crate::pricing::round_money;

use super::models::{Instalment, PaymentOptionType, PaymentSchedule};

/// Amount to charge now for a quote under the chosen payment option.
///
/// `base_total` is the quote total before the design fee. `duration_months`
/// is the subscription length for subscription and BOGOF bookings.
pub fn calculate_payment_amount(
    base_total: Decimal,
    payment_option_id: Uuid,
    pricing_model: PricingModel,
    options: &[PaymentOption],
    design_fee: Decimal,
    duration_months: Option<u32>,
) -> Decimal {
    build_schedule(
        base_total,
        payment_option_id,
        pricing_model,
        options,
        design_fee,
        duration_months,
    )
    .current_charge()
}

/// Every instalment the customer will pay under the chosen option.
pub fn build_schedule(
    base_total: Decimal,
    payment_option_id: Uuid,
    pricing_model: PricingModel,
    options: &[PaymentOption],
    design_fee: Decimal,
    duration_months: Option<u32>,
) -> PaymentSchedule {
    let Some(option) = options.iter().find(|o| o.id == payment_option_id) else {
        warn!(
            "Payment option {} not found; charging full amount",
            payment_option_id
        );
        return full_amount(base_total, design_fee);
    };

    let Some(option_type) = PaymentOptionType::parse(&option.option_type) else {
        warn!(
            "Payment option '{}' has unrecognised type '{}'; charging full amount",
            option.display_name, option.option_type
        );
        return full_amount(base_total, design_fee);
    };

    // Subscription lengths only bind month-based models
    let months = duration_months
        .filter(|_| pricing_model.uses_subscription_durations())
        .filter(|m| *m > 0);

    let blocks = match option_type {
        PaymentOptionType::Monthly => {
            let count = months.unwrap_or(option.minimum_payments).max(1);
            vec![1; count as usize]
        }
        PaymentOptionType::LumpSum => {
            let Some(block) = instalment_count(&option.display_name) else {
                warn!(
                    "Lump sum option '{}' has no instalment count; charging full amount",
                    option.display_name
                );
                return full_amount(base_total, design_fee);
            };
            match months {
                Some(total_months) => lump_sum_blocks(total_months, block),
                None => vec![block],
            }
        }
    };

    let discount = option.discount_percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let obligation = base_total * (Decimal::ONE - discount / Decimal::ONE_HUNDRED);

    schedule(Some(option_type), obligation, design_fee, &blocks)
}

/// Extract the instalment count encoded in a display name, e.g. 6 from
/// "6 Month Payment".
pub fn instalment_count(display_name: &str) -> Option<u32> {
    let digits: String = display_name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok().filter(|n| *n > 0)
}

/// Split `total_months` into lump-sum blocks of `block` months; the last
/// block may be shorter.
fn lump_sum_blocks(total_months: u32, block: u32) -> Vec<u32> {
    let mut blocks = Vec::new();
    let mut remaining = total_months;
    while remaining > 0 {
        let months = remaining.min(block);
        blocks.push(months);
        remaining -= months;
    }
    blocks
}

/// Allocate a total across weighted instalments with remainder handling.
///
/// Each share is rounded with banker's rounding, then any remainder (due to
/// rounding) goes to the first N instalments in 0.01 increments.
pub fn allocate(total: Decimal, weights: &[u32]) -> Vec<Decimal> {
    let weight_sum: u32 = weights.iter().sum();
    if weight_sum == 0 {
        return vec![Decimal::ZERO; weights.len()];
    }

    let total = round_money(total, 2);
    let mut amounts: Vec<Decimal> = weights
        .iter()
        .map(|w| round_money(total * Decimal::from(*w) / Decimal::from(weight_sum), 2))
        .collect();

    let allocated: Decimal = amounts.iter().sum();
    let remainder = total - allocated;

    if remainder != Decimal::ZERO {
        let increment = if remainder > Decimal::ZERO {
            Decimal::new(1, 2) // 0.01
        } else {
            Decimal::new(-1, 2) // -0.01
        };

        let adjustments_needed = (remainder.abs() / Decimal::new(1, 2))
            .to_usize()
            .unwrap_or(0);

        for amount in amounts.iter_mut().take(adjustments_needed) {
            *amount += increment;
        }
    }

    amounts
}

fn schedule(
    option_type: Option<PaymentOptionType>,
    obligation: Decimal,
    design_fee: Decimal,
    blocks: &[u32],
) -> PaymentSchedule {
    let mut amounts = allocate(obligation, blocks);
    let design_fee = round_money(design_fee, 2);
    if let Some(first) = amounts.first_mut() {
        *first += design_fee;
    }

    let instalments: Vec<Instalment> = amounts
        .into_iter()
        .zip(blocks)
        .enumerate()
        .map(|(i, (amount, months))| Instalment {
            sequence: i as u32 + 1,
            months_covered: *months,
            amount,
        })
        .collect();

    PaymentSchedule {
        option_type,
        fallback: option_type.is_none(),
        total: instalments.iter().map(|i| i.amount).sum(),
        design_fee,
        instalments,
    }
}

fn full_amount(base_total: Decimal, design_fee: Decimal) -> PaymentSchedule {
    schedule(None, base_total, design_fee, &[1])
}
