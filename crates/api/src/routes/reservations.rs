//! Route definitions for reservations.
//!
//! Mounted at `/reservations` by `api_routes()`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Reservation routes.
///
/// ```text
/// POST   /                     -> create_reservation
/// GET    /mine?from=           -> list_my_reservations
/// POST   /simulate-shortage    -> simulate_shortage (admin only)
/// DELETE /test                 -> delete_test_reservations (admin only)
/// DELETE /{id}                 -> cancel_reservation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/mine", get(reservations::list_my_reservations))
        .route("/simulate-shortage", post(reservations::simulate_shortage))
        .route("/test", delete(reservations::delete_test_reservations))
        .route("/{id}", delete(reservations::cancel_reservation))
}
