//! Mounted at `/calendar` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// ```text
/// GET /bookable?from=     -> get_bookable_dates
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/bookable", get(calendar::get_bookable_dates))
}
