pub mod availability;
pub mod calendar;
pub mod health;
pub mod reports;
pub mod reservations;
pub mod resources;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /resources                         list, add (admin)
/// /resources/{id}                    remove (admin)
/// /resources/{id}/position           move (admin)
/// /resources/{id}/active             activate / block (admin)
///
/// /availability                      merged day view + counts + shortage
/// /availability/floor-plan           floor-plan markers
///
/// /calendar/bookable                 bookable-date navigation
///
/// /reservations                      create
/// /reservations/{id}                 cancel (owner or admin)
/// /reservations/mine                 own upcoming reservations
/// /reservations/simulate-shortage    test fill (admin)
/// /reservations/test                 test cleanup (admin)
///
/// /reports/shortage                  file a forced-telework report
/// /reports/mine                      own reports
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/resources", resources::router())
        .nest("/availability", availability::router())
        .nest("/calendar", calendar::router())
        .nest("/reservations", reservations::router())
        .nest("/reports", reports::router())
}
