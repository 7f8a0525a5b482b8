//! Handlers for creating, cancelling and listing reservations, plus the
//! admin shortage simulation.
//!
//! Every booking goes through the core validator backed by
//! [`PgBookingStore`]; the database constraints catch what slips through a
//! concurrent race.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use deskbook_core::booking::{self, BookingRequest, CancelOutcome};
use deskbook_core::simulation::{plan_shortage_fill, simulate_shortage as run_simulation};
use deskbook_core::time_window::parse_wall_time;
use deskbook_core::types::DbId;
use deskbook_db::models::reservation::{CreateReservation, DateParams, FromDateParams};
use deskbook_db::repositories::{PgBookingStore, ReservationRepo};

use crate::error::AppResult;
use crate::handlers::availability::load_day;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /reservations
// ---------------------------------------------------------------------------

/// Book a resource for the authenticated user.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let start_time = input.start_time.as_deref().map(parse_wall_time).transpose()?;
    let end_time = input.end_time.as_deref().map(parse_wall_time).transpose()?;

    let request = BookingRequest {
        user_id: auth.user_id,
        resource_id: input.resource_id,
        date: input.date,
        start_time,
        end_time,
        is_test: false,
    };

    let store = PgBookingStore::new(&state.pool);
    let reservation =
        booking::create_reservation(&store, state.clock.as_ref(), &state.config.booking, request)
            .await?;

    tracing::info!(
        reservation_id = reservation.id,
        resource_id = %reservation.resource_id,
        user_id = %auth.user_id,
        date = %reservation.date,
        "Reservation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

// ---------------------------------------------------------------------------
// DELETE /reservations/{id}
// ---------------------------------------------------------------------------

/// Cancel a reservation. Owners may cancel their own, admins any.
///
/// Cancelling a reservation that no longer exists succeeds.
pub async fn cancel_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let store = PgBookingStore::new(&state.pool);

    match booking::cancel_reservation(&store, id, auth.actor()).await? {
        CancelOutcome::Cancelled(reservation) => {
            tracing::info!(
                reservation_id = id,
                resource_id = %reservation.resource_id,
                user_id = %auth.user_id,
                owner_id = %reservation.user_id,
                "Reservation cancelled",
            );
        }
        CancelOutcome::AlreadyGone => {
            tracing::debug!(reservation_id = id, user_id = %auth.user_id, "Reservation already gone");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /reservations/mine?from=
// ---------------------------------------------------------------------------

pub async fn list_my_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FromDateParams>,
) -> AppResult<impl IntoResponse> {
    let from = params.from.unwrap_or_else(|| state.clock.today());
    let reservations = ReservationRepo::list_for_user_from(&state.pool, auth.user_id, from).await?;
    Ok(Json(DataResponse { data: reservations }))
}

// ---------------------------------------------------------------------------
// POST /reservations/simulate-shortage
// ---------------------------------------------------------------------------

/// Fill most free desks on a date with test reservations. Admin only.
pub async fn simulate_shortage(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<DateParams>,
) -> AppResult<impl IntoResponse> {
    let day = load_day(&state.pool, input.date).await?;
    let plan = plan_shortage_fill(&day);

    let store = PgBookingStore::new(&state.pool);
    let outcome = run_simulation(
        &store,
        state.clock.as_ref(),
        &state.config.booking,
        admin.user_id,
        input.date,
        &plan,
    )
    .await?;

    tracing::info!(
        user_id = %admin.user_id,
        date = %input.date,
        requested = outcome.requested,
        created = outcome.created,
        failed = outcome.failed,
        "Shortage simulation finished",
    );

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// DELETE /reservations/test
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DeletedCount {
    pub deleted: u64,
}

/// Remove the calling admin's test reservations on every date.
pub async fn delete_test_reservations(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let deleted = ReservationRepo::delete_test_for_user(&state.pool, admin.user_id).await?;

    tracing::info!(user_id = %admin.user_id, deleted, "Test reservations removed");

    Ok(Json(DataResponse {
        data: DeletedCount { deleted },
    }))
}
