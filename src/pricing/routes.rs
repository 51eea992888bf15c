//! Pricing endpoints

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::calculators::format_price;
use super::responses::PriceResponse;
use super::selection::Selection;
use super::services;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/calculate", post(calculate))
}

async fn calculate(
    State(state): State<AppState>,
    Json(selection): Json<Selection>,
) -> Result<Json<PriceResponse>> {
    let breakdown = services::price_selection(&state, &selection).await?;
    let formatted_total = breakdown
        .as_ref()
        .map(|b| format_price(b.final_total, &state.config.currency_symbol));

    Ok(Json(PriceResponse {
        breakdown,
        formatted_total,
    }))
}
