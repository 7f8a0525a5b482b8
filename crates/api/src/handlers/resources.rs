//! Handlers for the resource catalog.
//!
//! Any authenticated user may list the catalog. Every mutation requires the
//! admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use deskbook_core::error::CoreError;
use deskbook_core::resource::{activation_change, validate_new_resource, NewResource, Position};
use deskbook_db::models::resource::{ResourceListParams, UpdateActivation, UpdatePosition};
use deskbook_db::repositories::{ReservationRepo, ResourceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn resource_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::not_found("Resource", id))
}

// ---------------------------------------------------------------------------
// GET /resources
// ---------------------------------------------------------------------------

/// List the catalog, optionally filtered by `?type=`.
pub async fn list_resources(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ResourceListParams>,
) -> AppResult<impl IntoResponse> {
    let resources = ResourceRepo::list(&state.pool, params.resource_type).await?;
    Ok(Json(DataResponse { data: resources }))
}

// ---------------------------------------------------------------------------
// POST /resources
// ---------------------------------------------------------------------------

/// Add a resource to the catalog. Admin only.
pub async fn create_resource(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewResource>,
) -> AppResult<impl IntoResponse> {
    validate_new_resource(&input)?;

    if ResourceRepo::find_by_id(&state.pool, &input.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Resource '{}' already exists",
            input.id
        ))));
    }

    // Removed resources keep their reservations; the id stays retired while
    // any of them remain.
    if ReservationRepo::exists_for_resource(&state.pool, &input.id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Resource id '{}' is still referenced by existing reservations",
            input.id
        ))));
    }

    let resource = ResourceRepo::create(&state.pool, &input).await?;

    tracing::info!(
        resource_id = %resource.id,
        resource_type = %resource.resource_type,
        user_id = %admin.user_id,
        "Resource added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: resource })))
}

// ---------------------------------------------------------------------------
// DELETE /resources/{id}
// ---------------------------------------------------------------------------

/// Remove a resource. Its reservations are kept. Admin only.
pub async fn delete_resource(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !ResourceRepo::delete(&state.pool, &id).await? {
        return Err(resource_not_found(&id));
    }

    tracing::info!(resource_id = %id, user_id = %admin.user_id, "Resource removed");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PUT /resources/{id}/position
// ---------------------------------------------------------------------------

/// Move a resource on the floor plan. Admin only.
pub async fn move_resource(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePosition>,
) -> AppResult<impl IntoResponse> {
    if !input.x.is_finite() || !input.y.is_finite() {
        return Err(AppError::BadRequest(
            "Position coordinates must be finite numbers".into(),
        ));
    }

    let resource = ResourceRepo::update_position(
        &state.pool,
        &id,
        Position {
            x: input.x,
            y: input.y,
        },
    )
    .await?
    .ok_or_else(|| resource_not_found(&id))?;

    tracing::debug!(
        resource_id = %id,
        user_id = %admin.user_id,
        x = input.x,
        y = input.y,
        "Resource moved",
    );

    Ok(Json(DataResponse { data: resource }))
}

// ---------------------------------------------------------------------------
// PUT /resources/{id}/active
// ---------------------------------------------------------------------------

/// Activate or block a resource. Admin only.
///
/// Blocking stores the reason and advisory end date as given; reactivating
/// clears both.
pub async fn set_resource_active(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateActivation>,
) -> AppResult<impl IntoResponse> {
    let change = activation_change(input.is_active, input.block_reason, input.block_until);

    let resource = ResourceRepo::set_active(&state.pool, &id, &change)
        .await?
        .ok_or_else(|| resource_not_found(&id))?;

    tracing::info!(
        resource_id = %id,
        user_id = %admin.user_id,
        is_active = resource.is_active,
        block_reason = ?resource.block_reason,
        "Resource activation changed",
    );

    Ok(Json(DataResponse { data: resource }))
}
