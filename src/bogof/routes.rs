//! BOGOF eligibility endpoint

use axum::{extract::State, routing::post, Json, Router};

use crate::AppState;

use super::eligibility::EligibilityChecker;
use super::history::PgBookingHistory;
use super::models::{BogofIdentity, EligibilityResult};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bogof/eligibility", post(check_eligibility))
}

/// Check whether the identity may take a BOGOF booking.
///
/// Always answers 200; denial and lookup trouble are both part of the body.
async fn check_eligibility(
    State(state): State<AppState>,
    Json(identity): Json<BogofIdentity>,
) -> Json<EligibilityResult> {
    let checker = EligibilityChecker::new(
        PgBookingHistory::new(state.db.clone()),
        state.config.bogof_lookup_timeout,
        state.config.bogof_warning_limit,
    );

    Json(checker.check(&identity).await)
}
