//! Floor plan markers projected from the merged availability view.

use serde::Serialize;

use crate::availability::{DayAvailability, Occupancy, ResourceAvailability};
use crate::reservation::Actor;
use crate::resource::{Position, ResourceType};
use crate::time_window::format_wall_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    Red,
    Grey,
    Green,
    Yellow,
    LightYellow,
}

impl MarkerColor {
    pub fn for_resource(view: &ResourceAvailability) -> Self {
        match view.occupancy {
            Occupancy::Reserved => MarkerColor::Red,
            Occupancy::Blocked => MarkerColor::Grey,
            Occupancy::Free => match view.resource.resource_type {
                ResourceType::Desk => MarkerColor::Green,
                ResourceType::Room => MarkerColor::Yellow,
                ResourceType::Slot | ResourceType::Baby => MarkerColor::LightYellow,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlanMarker {
    pub resource_id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub name: String,
    pub position: Position,
    pub color: MarkerColor,
    pub tooltip: String,
    /// Whether a click opens the booking flow.
    pub selectable: bool,
    /// Whether move/toggle/delete controls are offered.
    pub editable: bool,
}

fn tooltip(view: &ResourceAvailability) -> String {
    let name = &view.resource.name;
    match view.occupancy {
        Occupancy::Free => format!("{name}\nAvailable"),
        Occupancy::Reserved => {
            let lines: Vec<String> = view
                .reservations
                .iter()
                .map(|a| {
                    let holder = a.requester.display_name.as_deref().unwrap_or("Unknown user");
                    format!(
                        "Reserved by {holder} {}-{}",
                        format_wall_time(a.reservation.start_time),
                        format_wall_time(a.reservation.end_time)
                    )
                })
                .collect();
            format!("{name}\n{}", lines.join("\n"))
        }
        Occupancy::Blocked => {
            let mut text = format!(
                "{name}\nUnavailable: {}",
                view.resource.block_reason.as_deref().unwrap_or("blocked")
            );
            if let Some(until) = view.resource.block_until {
                text.push_str(&format!(" (until {})", until.format("%Y-%m-%d")));
            }
            text
        }
    }
}

pub fn marker(view: &ResourceAvailability, viewer: &Actor) -> FloorPlanMarker {
    FloorPlanMarker {
        resource_id: view.resource.id.clone(),
        resource_type: view.resource.resource_type,
        name: view.resource.name.clone(),
        position: view.resource.position,
        color: MarkerColor::for_resource(view),
        tooltip: tooltip(view),
        // Admins click to edit, users click to book or inspect.
        selectable: !viewer.is_admin && view.occupancy != Occupancy::Blocked,
        editable: viewer.is_admin,
    }
}

/// One marker per catalog entry, in catalog order.
pub fn project(day: &DayAvailability, viewer: &Actor) -> Vec<FloorPlanMarker> {
    day.resources.iter().map(|v| marker(v, viewer)).collect()
}
