//! Repository for the `resources` table.

use deskbook_core::resource::{ActivationChange, NewResource, Position, Resource, ResourceType};
use sqlx::PgPool;

use crate::models::resource::ResourceRow;

/// Column list for `resources` queries.
const COLUMNS: &str = "\
    id, resource_type, name, capacity, pos_x, pos_y, \
    is_active, block_reason, block_until, created_at, updated_at";

/// Provides catalog reads and admin mutations.
pub struct ResourceRepo;

impl ResourceRepo {
    /// List the catalog, optionally restricted to one type, ordered by id.
    pub async fn list(
        pool: &PgPool,
        resource_type: Option<ResourceType>,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let rows = match resource_type {
            Some(t) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM resources WHERE resource_type = $1 ORDER BY id"
                );
                sqlx::query_as::<_, ResourceRow>(&query)
                    .bind(t.as_str())
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM resources ORDER BY id");
                sqlx::query_as::<_, ResourceRow>(&query)
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Resource::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Resource::from))
    }

    /// Insert a new catalog entry. A duplicate id violates `uq_resources_id`.
    pub async fn create(pool: &PgPool, input: &NewResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (id, resource_type, name, capacity, pos_x, pos_y) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(&input.id)
            .bind(input.resource_type.as_str())
            .bind(&input.name)
            .bind(input.capacity)
            .bind(input.position.x)
            .bind(input.position.y)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Delete a resource. Reservations referencing it are left in place.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update_position(
        pool: &PgPool,
        id: &str,
        position: Position,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET pos_x = $2, pos_y = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(id)
            .bind(position.x)
            .bind(position.y)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Resource::from))
    }

    /// Persist an activation change computed by
    /// [`deskbook_core::resource::activation_change`].
    pub async fn set_active(
        pool: &PgPool,
        id: &str,
        change: &ActivationChange,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources \
             SET is_active = $2, block_reason = $3, block_until = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(id)
            .bind(change.is_active)
            .bind(&change.block_reason)
            .bind(change.block_until)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Resource::from))
    }
}
