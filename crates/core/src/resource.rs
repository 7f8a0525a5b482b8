//! Bookable resources: types, identity conventions, and catalog rules.
//!
//! A resource's type is stored explicitly and is the only source of truth
//! for booking logic. The id prefix convention (`bureau_flex_3`, `place_7`,
//! ...) is checked when an administrator adds a resource so that the two
//! never disagree, but bookings never derive their type from an id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Resource type
// ---------------------------------------------------------------------------

/// The four kinds of bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Desk,
    Room,
    Slot,
    Baby,
}

/// Id prefix for baby spots. Must be matched before [`ID_PREFIX_SLOT`].
pub const ID_PREFIX_BABY: &str = "place_baby_";
/// Id prefix for parking slots.
pub const ID_PREFIX_SLOT: &str = "place_";
/// Id prefix for flex desks.
pub const ID_PREFIX_DESK: &str = "bureau_flex_";
/// Id prefix for meeting rooms.
pub const ID_PREFIX_ROOM: &str = "salle_reunion_";

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Desk,
        ResourceType::Room,
        ResourceType::Slot,
        ResourceType::Baby,
    ];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Desk => "desk",
            ResourceType::Room => "room",
            ResourceType::Slot => "slot",
            ResourceType::Baby => "baby",
        }
    }

    /// Human-readable label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Desk => "desk",
            ResourceType::Room => "meeting room",
            ResourceType::Slot => "parking slot",
            ResourceType::Baby => "baby spot",
        }
    }

    /// Slot and baby bookings always cover the whole day.
    pub fn is_full_day(self) -> bool {
        matches!(self, ResourceType::Slot | ResourceType::Baby)
    }

    /// Infer the type implied by an id prefix, if any.
    pub fn from_id_prefix(id: &str) -> Option<Self> {
        if id.starts_with(ID_PREFIX_BABY) {
            Some(ResourceType::Baby)
        } else if id.starts_with(ID_PREFIX_SLOT) {
            Some(ResourceType::Slot)
        } else if id.starts_with(ID_PREFIX_DESK) {
            Some(ResourceType::Desk)
        } else if id.starts_with(ID_PREFIX_ROOM) {
            Some(ResourceType::Room)
        } else {
            None
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desk" => Ok(ResourceType::Desk),
            "room" => Ok(ResourceType::Room),
            "slot" => Ok(ResourceType::Slot),
            "baby" => Ok(ResourceType::Baby),
            other => Err(CoreError::Validation(format!(
                "Invalid resource type '{other}'. Must be one of: desk, room, slot, baby"
            ))),
        }
    }
}

impl TryFrom<String> for ResourceType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Resource entity
// ---------------------------------------------------------------------------

/// Floor-plan coordinates. Irrelevant to booking logic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub name: String,
    pub capacity: i16,
    pub position: Position,
    pub is_active: bool,
    pub block_reason: Option<String>,
    pub block_until: Option<Timestamp>,
}

impl Resource {
    /// Whether new reservations may be created against this resource.
    ///
    /// `block_until` is advisory only; reactivation is an explicit admin action.
    pub fn is_bookable(&self) -> bool {
        self.is_active
    }
}

// ---------------------------------------------------------------------------
// Catalog mutation rules
// ---------------------------------------------------------------------------

/// Only single-occupant resources are supported.
pub const SUPPORTED_CAPACITY: i16 = 1;

fn default_capacity() -> i16 {
    SUPPORTED_CAPACITY
}

/// Input for adding a resource to the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewResource {
    #[validate(length(min = 1, max = 64, message = "id must be 1-64 characters"))]
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default = "default_capacity")]
    #[validate(range(min = 1, max = 1, message = "capacity must be 1"))]
    pub capacity: i16,
    #[serde(default)]
    pub position: Position,
}

/// Validate a new catalog entry before insertion.
///
/// Beyond the field checks, an id that follows a known prefix convention
/// must agree with the declared type.
pub fn validate_new_resource(input: &NewResource) -> Result<(), CoreError> {
    input.validate()?;

    if input.id.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Resource id '{}' must not contain whitespace",
            input.id
        )));
    }

    if let Some(implied) = ResourceType::from_id_prefix(&input.id) {
        if implied != input.resource_type {
            return Err(CoreError::Validation(format!(
                "Resource id '{}' implies type '{implied}' but '{}' was given",
                input.id, input.resource_type
            )));
        }
    }
    Ok(())
}

/// The resulting activation columns of a `set_active` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationChange {
    pub is_active: bool,
    pub block_reason: Option<String>,
    pub block_until: Option<Timestamp>,
}

/// Compute the activation state to persist.
///
/// Deactivation stores reason/until as given (no check that `until` is in
/// the future). Reactivation clears both unconditionally.
pub fn activation_change(
    active: bool,
    reason: Option<String>,
    until: Option<Timestamp>,
) -> ActivationChange {
    if active {
        return ActivationChange {
            is_active: true,
            block_reason: None,
            block_until: None,
        };
    }

    let block_reason = reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    ActivationChange {
        is_active: false,
        block_reason,
        block_until: until,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
