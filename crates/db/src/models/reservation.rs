//! Reservation rows, joined views, and DTOs.

use chrono::NaiveDate;
use deskbook_core::reservation::{AttachedReservation, Requester, Reservation};
use deskbook_core::resource::ResourceType;
use deskbook_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: DbId,
    pub user_id: UserId,
    pub resource_id: String,
    #[sqlx(try_from = "String")]
    pub resource_type: ResourceType,
    pub date: NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub is_test: bool,
    pub created_at: Timestamp,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            user_id: row.user_id,
            resource_id: row.resource_id,
            resource_type: row.resource_type,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_test: row.is_test,
            created_at: row.created_at,
        }
    }
}

/// A reservation joined with the holder's profile.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationWithRequesterRow {
    #[sqlx(flatten)]
    pub reservation: ReservationRow,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<ReservationWithRequesterRow> for AttachedReservation {
    fn from(row: ReservationWithRequesterRow) -> Self {
        AttachedReservation {
            reservation: row.reservation.into(),
            requester: Requester {
                display_name: row.display_name,
                avatar_url: row.avatar_url,
            },
        }
    }
}

/// A reservation joined with its resource's display name.
///
/// `resource_name` is `None` once the resource has been removed.
#[derive(Debug, Clone, FromRow)]
pub struct OwnReservationRow {
    #[sqlx(flatten)]
    pub reservation: ReservationRow,
    pub resource_name: Option<String>,
}

/// A user's own reservation as listed on "my reservations".
#[derive(Debug, Clone, Serialize)]
pub struct OwnReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub resource_name: Option<String>,
}

impl From<OwnReservationRow> for OwnReservation {
    fn from(row: OwnReservationRow) -> Self {
        OwnReservation {
            reservation: row.reservation.into(),
            resource_name: row.resource_name,
        }
    }
}

/// DTO for booking a resource. Times are `HH:MM`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservation {
    #[validate(length(min = 1, max = 64, message = "resource_id must be 1-64 characters"))]
    pub resource_id: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Query parameters for the availability and floor-plan views.
#[derive(Debug, Deserialize)]
pub struct DateParams {
    pub date: NaiveDate,
}

/// Query parameters for "my reservations". Defaults to today.
#[derive(Debug, Deserialize)]
pub struct FromDateParams {
    pub from: Option<NaiveDate>,
}
