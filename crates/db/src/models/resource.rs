//! Resource catalog rows and DTOs.

use deskbook_core::resource::{Position, Resource, ResourceType};
use deskbook_core::types::Timestamp;
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceRow {
    pub id: String,
    #[sqlx(try_from = "String")]
    pub resource_type: ResourceType,
    pub name: String,
    pub capacity: i16,
    pub pos_x: f64,
    pub pos_y: f64,
    pub is_active: bool,
    pub block_reason: Option<String>,
    pub block_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            resource_type: row.resource_type,
            name: row.name,
            capacity: row.capacity,
            position: Position {
                x: row.pos_x,
                y: row.pos_y,
            },
            is_active: row.is_active,
            block_reason: row.block_reason,
            block_until: row.block_until,
        }
    }
}

/// Query parameters for listing the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceListParams {
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
}

/// DTO for moving a resource on the floor plan.
#[derive(Debug, Deserialize)]
pub struct UpdatePosition {
    pub x: f64,
    pub y: f64,
}

/// DTO for activating or blocking a resource.
#[derive(Debug, Deserialize)]
pub struct UpdateActivation {
    pub is_active: bool,
    pub block_reason: Option<String>,
    pub block_until: Option<Timestamp>,
}
