//! Handlers for the merged availability view and the floor plan.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use deskbook_core::availability::{resolve, DayAvailability};
use deskbook_core::floor_plan::project;
use deskbook_core::shortage::{assess, ShortageAssessment};
use deskbook_db::models::reservation::DateParams;
use deskbook_db::repositories::{ReservationRepo, ResourceRepo};
use deskbook_db::DbPool;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load the catalog and the date's reservations and merge them.
pub(crate) async fn load_day(pool: &DbPool, date: NaiveDate) -> Result<DayAvailability, sqlx::Error> {
    let catalog = ResourceRepo::list(pool, None).await?;
    let reservations = ReservationRepo::list_for_date_with_requester(pool, date).await?;
    let day = resolve(date, catalog, reservations);

    if day.orphaned > 0 {
        tracing::debug!(%date, orphaned = day.orphaned, "Reservations on removed resources ignored");
    }

    Ok(day)
}

/// The merged day view with the shortage advisory attached.
#[derive(Debug, Serialize)]
pub struct AvailabilityView {
    #[serde(flatten)]
    pub day: DayAvailability,
    pub shortage: ShortageAssessment,
}

// ---------------------------------------------------------------------------
// GET /availability?date=
// ---------------------------------------------------------------------------

pub async fn get_availability(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> AppResult<impl IntoResponse> {
    let day = load_day(&state.pool, params.date).await?;
    let shortage = assess(&day);

    Ok(Json(DataResponse {
        data: AvailabilityView { day, shortage },
    }))
}

// ---------------------------------------------------------------------------
// GET /availability/floor-plan?date=
// ---------------------------------------------------------------------------

/// Markers for every catalog entry, rendered for the caller's role.
pub async fn get_floor_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> AppResult<impl IntoResponse> {
    let day = load_day(&state.pool, params.date).await?;
    let markers = project(&day, &auth.actor());

    Ok(Json(DataResponse { data: markers }))
}
