//! Payment endpoints

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::pricing::{format_price, services as pricing};
use crate::AppState;

use super::calculators::build_schedule;
use super::requests::PaymentAmountRequest;
use super::responses::PaymentAmountResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/payments/amount", post(payment_amount))
}

/// Amount due now, plus the full schedule, for a selection and option.
///
/// BOGOF eligibility is not checked here; callers run
/// `/api/bogof/eligibility` before taking a BOGOF payment.
async fn payment_amount(
    State(state): State<AppState>,
    Json(request): Json<PaymentAmountRequest>,
) -> Result<Json<PaymentAmountResponse>> {
    let breakdown = pricing::require_price(&state, &request.selection).await?;
    let catalog = state
        .cache
        .catalog(&state.db, state.config.design_fee)
        .await?;

    let schedule = build_schedule(
        breakdown.total_before_design,
        request.payment_option_id,
        breakdown.pricing_model,
        &catalog.payment_options,
        breakdown.design_fee,
        Some(breakdown.duration_value),
    );
    let amount = schedule.current_charge();

    Ok(Json(PaymentAmountResponse {
        amount,
        formatted_amount: format_price(amount, &state.config.currency_symbol),
        schedule,
    }))
}
