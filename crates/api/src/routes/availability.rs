//! Route definitions for availability views.
//!
//! Mounted at `/availability` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Availability routes.
///
/// ```text
/// GET /?date=             -> get_availability
/// GET /floor-plan?date=   -> get_floor_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(availability::get_availability))
        .route("/floor-plan", get(availability::get_floor_plan))
}
