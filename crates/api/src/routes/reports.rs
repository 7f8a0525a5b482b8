//! Route definitions for forced-telework reports.
//!
//! Mounted at `/reports` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// ```text
/// POST /shortage   -> create_shortage_report
/// GET  /mine       -> list_my_reports
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shortage", post(reports::create_shortage_report))
        .route("/mine", get(reports::list_my_reports))
}
