//! Availability resolver: merges the catalog with one day's reservations.
//!
//! Reservations are matched by walking the catalog, so a reservation whose
//! resource has been deleted is never attached to anything and does not
//! appear in the merged view or the per-type counts.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::AttachedReservation;
use crate::resource::{Resource, ResourceType};

/// Occupancy state of a single resource on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Free,
    Reserved,
    Blocked,
}

/// A catalog entry with the reservations held against it on the target date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceAvailability {
    #[serde(flatten)]
    pub resource: Resource,
    pub occupancy: Occupancy,
    pub reservations: Vec<AttachedReservation>,
}

impl ResourceAvailability {
    fn new(resource: Resource, reservations: Vec<AttachedReservation>) -> Self {
        // An existing booking stays visible on a resource blocked after it was made.
        let occupancy = if !reservations.is_empty() {
            Occupancy::Reserved
        } else if !resource.is_active {
            Occupancy::Blocked
        } else {
            Occupancy::Free
        };
        Self {
            resource,
            occupancy,
            reservations,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.occupancy == Occupancy::Reserved
    }
}

/// `{total, available}` for one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeAvailability {
    pub total: usize,
    pub available: usize,
}

impl TypeAvailability {
    pub fn reserved(&self) -> usize {
        self.total - self.available
    }
}

/// Per-type counts for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AvailabilitySummary {
    pub desks: TypeAvailability,
    pub rooms: TypeAvailability,
    pub parking: TypeAvailability,
    pub baby: TypeAvailability,
}

impl AvailabilitySummary {
    pub fn for_type(&self, resource_type: ResourceType) -> TypeAvailability {
        match resource_type {
            ResourceType::Desk => self.desks,
            ResourceType::Room => self.rooms,
            ResourceType::Slot => self.parking,
            ResourceType::Baby => self.baby,
        }
    }

    fn entry(&mut self, resource_type: ResourceType) -> &mut TypeAvailability {
        match resource_type {
            ResourceType::Desk => &mut self.desks,
            ResourceType::Room => &mut self.rooms,
            ResourceType::Slot => &mut self.parking,
            ResourceType::Baby => &mut self.baby,
        }
    }
}

/// The merged view for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub resources: Vec<ResourceAvailability>,
    pub summary: AvailabilitySummary,
    /// Reservations for the date whose resource is not in the catalog.
    #[serde(skip)]
    pub orphaned: usize,
}

impl DayAvailability {
    /// Reservations attached to catalog entries.
    pub fn reservation_count(&self) -> usize {
        self.resources.iter().map(|r| r.reservations.len()).sum()
    }

    pub fn get(&self, resource_id: &str) -> Option<&ResourceAvailability> {
        self.resources.iter().find(|r| r.resource.id == resource_id)
    }

    pub fn of_type(
        &self,
        resource_type: ResourceType,
    ) -> impl Iterator<Item = &ResourceAvailability> + '_ {
        self.resources
            .iter()
            .filter(move |r| r.resource.resource_type == resource_type)
    }
}

/// Join `catalog` with `reservations` for `date`.
///
/// Reservations on other dates are ignored. Within a resource, reservations
/// are ordered by start time. Catalog order is preserved.
pub fn resolve(
    date: NaiveDate,
    catalog: Vec<Resource>,
    reservations: Vec<AttachedReservation>,
) -> DayAvailability {
    let mut by_resource: HashMap<String, Vec<AttachedReservation>> = HashMap::new();
    for attached in reservations
        .into_iter()
        .filter(|a| a.reservation.date == date)
    {
        by_resource
            .entry(attached.reservation.resource_id.clone())
            .or_default()
            .push(attached);
    }

    let mut summary = AvailabilitySummary::default();
    let mut resources = Vec::with_capacity(catalog.len());

    for resource in catalog {
        let mut held = by_resource.remove(&resource.id).unwrap_or_default();
        held.sort_by_key(|a| a.reservation.start_time);

        let view = ResourceAvailability::new(resource, held);
        let counts = summary.entry(view.resource.resource_type);
        counts.total += 1;
        if !view.is_reserved() {
            counts.available += 1;
        }
        resources.push(view);
    }

    let orphaned = by_resource.values().map(Vec::len).sum();

    DayAvailability {
        date,
        resources,
        summary,
        orphaned,
    }
}
