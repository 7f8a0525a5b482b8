//! Admin shortage simulation: fill most desks on a date with test bookings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::{DayAvailability, Occupancy};
use crate::booking::{create_reservation, BookingError, BookingRequest, BookingStore};
use crate::calendar::BookingPolicy;
use crate::clock::Clock;
use crate::resource::ResourceType;
use crate::time_window::TimeWindow;
use crate::types::UserId;

/// Share of the desk catalog targeted by a simulation, in tenths.
pub const SIMULATION_FILL_TENTHS: usize = 9;

/// Desks to book: the first free, active desks in catalog order, up to 90%
/// of all desks (rounded down).
pub fn plan_shortage_fill(day: &DayAvailability) -> Vec<String> {
    let target = day.summary.desks.total * SIMULATION_FILL_TENTHS / 10;
    day.of_type(ResourceType::Desk)
        .filter(|view| view.occupancy == Occupancy::Free)
        .take(target)
        .map(|view| view.resource.id.clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SimulationOutcome {
    pub requested: usize,
    pub created: usize,
    pub failed: usize,
}

/// Book each planned desk for the admin as a test reservation.
///
/// Rejected desks are counted in `failed` and do not stop the run. Store
/// failures abort it.
pub async fn simulate_shortage<S: BookingStore + ?Sized>(
    store: &S,
    clock: &dyn Clock,
    policy: &BookingPolicy,
    admin_id: UserId,
    date: NaiveDate,
    plan: &[String],
) -> Result<SimulationOutcome, BookingError<S::Error>> {
    let window = TimeWindow::default_partial_day();
    let mut outcome = SimulationOutcome {
        requested: plan.len(),
        ..Default::default()
    };

    for resource_id in plan {
        let request = BookingRequest {
            user_id: admin_id,
            resource_id: resource_id.clone(),
            date,
            start_time: Some(window.start),
            end_time: Some(window.end),
            is_test: true,
        };
        match create_reservation(store, clock, policy, request).await {
            Ok(_) => outcome.created += 1,
            Err(BookingError::Rejected(_)) => outcome.failed += 1,
            Err(err) => return Err(err),
        }
    }

    Ok(outcome)
}
