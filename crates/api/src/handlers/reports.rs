//! Handlers for forced-telework reports.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use deskbook_core::shortage::{is_shortage, NewShortageReport};
use deskbook_db::models::telework_report::CreateTeleworkReport;
use deskbook_db::repositories::TeleworkReportRepo;

use crate::error::AppResult;
use crate::handlers::availability::load_day;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /reports/shortage
// ---------------------------------------------------------------------------

/// Record that the caller is staying remote for lack of space on `date`.
///
/// The snapshot is taken from the current availability, not from what the
/// client saw. Repeated reports for the same date are all kept.
pub async fn create_shortage_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeleworkReport>,
) -> AppResult<impl IntoResponse> {
    let day = load_day(&state.pool, input.date).await?;
    let report = NewShortageReport::space_shortage(auth.user_id, &day);
    let created = TeleworkReportRepo::create(&state.pool, &report).await?;

    tracing::info!(
        report_id = created.id,
        user_id = %auth.user_id,
        date = %created.date,
        shortage = is_shortage(day.summary.desks),
        "Forced-telework report filed",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /reports/mine
// ---------------------------------------------------------------------------

pub async fn list_my_reports(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reports = TeleworkReportRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: reports }))
}
