use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use deskbook_db::models::reservation::FromDateParams;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Date navigation around `from` under the configured booking policy.
#[derive(Debug, Serialize)]
pub struct BookableDates {
    pub today: NaiveDate,
    pub from: NaiveDate,
    /// Whether `from` itself accepts new reservations.
    pub bookable: bool,
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
    /// `None` when the horizon is disabled.
    pub last_bookable: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// GET /calendar/bookable?from=
// ---------------------------------------------------------------------------

pub async fn get_bookable_dates(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FromDateParams>,
) -> AppResult<impl IntoResponse> {
    let policy = &state.config.booking;
    let today = state.clock.today();
    let from = params.from.unwrap_or(today);

    Ok(Json(DataResponse {
        data: BookableDates {
            today,
            from,
            bookable: policy.allows(from, today),
            previous: policy.previous_bookable(from, today),
            next: policy.next_bookable(from, today),
            last_bookable: policy.last_bookable_date(today),
        },
    }))
}
