//! Quote endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::payload::{resolve_selection, ResolvedSelection};
use crate::pricing::{format_price, services as pricing};
use crate::AppState;

use super::models::{NewQuote, QuoteRecord};
use super::queries;
use super::requests::CreateQuoteRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quotes", post(create))
        .route("/api/quotes/:id", get(show))
}

/// Quote with names resolved for display and downstream payloads
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: QuoteRecord,
    pub resolved_selection: ResolvedSelection,
    pub formatted_total: String,
}

/// Price and save a quote.
///
/// BOGOF eligibility is not checked here; callers run
/// `/api/bogof/eligibility` before offering a BOGOF quote.
async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteResponse>)> {
    request.validate()?;

    let pricing = pricing::require_price(&state, &request.selection).await?;
    let quote = queries::insert_quote(
        &state.db,
        &NewQuote {
            contact_name: request.contact_name,
            contact_email: request.contact_email,
            contact_phone: request.contact_phone,
            business_name: request.business_name,
            selection: request.selection,
            pricing,
        },
    )
    .await?;

    tracing::info!(quote = %quote.id, total = %quote.pricing.final_total, "Quote created");

    Ok((StatusCode::CREATED, Json(respond(&state, quote).await?)))
}

async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuoteResponse>> {
    let quote = queries::get_quote(&state.db, id).await?;
    Ok(Json(respond(&state, quote).await?))
}

async fn respond(state: &AppState, quote: QuoteRecord) -> Result<QuoteResponse> {
    let catalog = state
        .cache
        .catalog(&state.db, state.config.design_fee)
        .await?;

    Ok(QuoteResponse {
        resolved_selection: resolve_selection(&quote.selections, &catalog),
        formatted_total: format_price(
            quote.pricing.final_total,
            &state.config.currency_symbol,
        ),
        quote,
    })
}
