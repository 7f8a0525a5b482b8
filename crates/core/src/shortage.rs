//! Desk shortage detection and forced-telework reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{DayAvailability, TypeAvailability};
use crate::types::UserId;

/// Reserved share of desks, in percent, at which a shortage is flagged.
pub const SHORTAGE_THRESHOLD_PERCENT: usize = 70;

/// `reason` recorded on forced-telework reports.
pub const REPORT_REASON_SHORTAGE: &str = "space_shortage";

/// Whether `reserved` out of `total` desks reaches the threshold (inclusive).
///
/// An empty catalog never signals a shortage.
pub fn is_shortage(desks: TypeAvailability) -> bool {
    desks.total > 0 && desks.reserved() * 100 >= desks.total * SHORTAGE_THRESHOLD_PERCENT
}

/// The advisory shown with the availability view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortageAssessment {
    pub shortage: bool,
    pub desks: TypeAvailability,
    pub parking: TypeAvailability,
    pub baby: TypeAvailability,
}

pub fn assess(day: &DayAvailability) -> ShortageAssessment {
    let summary = day.summary;
    ShortageAssessment {
        shortage: is_shortage(summary.desks),
        desks: summary.desks,
        parking: summary.parking,
        baby: summary.baby,
    }
}

/// Snapshot persisted with a forced-telework report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageReportDetails {
    pub desk_availability: TypeAvailability,
    pub parking_availability: TypeAvailability,
    pub baby_availability: TypeAvailability,
    pub total_reservations: usize,
}

impl ShortageReportDetails {
    pub fn snapshot(day: &DayAvailability) -> Self {
        Self {
            desk_availability: day.summary.desks,
            parking_availability: day.summary.parking,
            baby_availability: day.summary.baby,
            total_reservations: day.reservation_count(),
        }
    }
}

/// An append-only report row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortageReport {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub reason: String,
    pub details: ShortageReportDetails,
}

impl NewShortageReport {
    pub fn space_shortage(user_id: UserId, day: &DayAvailability) -> Self {
        Self {
            user_id,
            date: day.date,
            reason: REPORT_REASON_SHORTAGE.to_string(),
            details: ShortageReportDetails::snapshot(day),
        }
    }
}
