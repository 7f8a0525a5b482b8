//! Route definitions for the resource catalog.
//!
//! Mounted at `/resources` by `api_routes()`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::resources;
use crate::state::AppState;

/// Resource catalog routes.
///
/// ```text
/// GET    /                  -> list_resources
/// POST   /                  -> create_resource (admin only)
/// DELETE /{id}              -> delete_resource (admin only)
/// PUT    /{id}/position     -> move_resource (admin only)
/// PUT    /{id}/active       -> set_resource_active (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route("/{id}", delete(resources::delete_resource))
        .route("/{id}/position", put(resources::move_resource))
        .route("/{id}/active", put(resources::set_resource_active))
}
