//! Reservation entity and the requester identity attached for display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceType;
use crate::time_window::TimeWindow;
use crate::types::{DbId, Timestamp, UserId};

/// A persisted booking. Never updated in place: a change is cancel + recreate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: DbId,
    pub user_id: UserId,
    pub resource_id: String,
    /// Copy of the resource's type at booking time.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub date: NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub is_test: bool,
    pub created_at: Timestamp,
}

impl Reservation {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

/// A reservation ready to be inserted. Its type has already been derived
/// from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub user_id: UserId,
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub is_test: bool,
}

/// Denormalised profile of the user holding a reservation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Requester {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A reservation joined with its holder's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachedReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub requester: Requester,
}

/// Identity of the caller performing a booking operation.
///
/// Admin status is supplied by the identity provider on every call and is
/// never derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Actor {
    pub fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Owners and administrators may cancel a reservation.
    pub fn may_cancel(&self, reservation: &Reservation) -> bool {
        self.is_admin || reservation.user_id == self.user_id
    }
}
