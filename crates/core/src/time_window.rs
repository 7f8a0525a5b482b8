//! Wall-clock booking windows (`HH:MM`) within a single calendar day.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A half-open `[start, end)` interval of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The 00:00-23:59 window used by slot and baby bookings.
    pub fn full_day() -> Self {
        Self::new(hm(0, 0), hm(23, 59))
    }

    /// The 09:00-17:00 window applied to desk and room bookings without explicit times.
    pub fn default_partial_day() -> Self {
        Self::new(hm(9, 0), hm(17, 0))
    }

    /// A window is well-formed when it has positive length.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// `s2 < e1 AND s1 < e2`. Touching windows do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        other.start < self.end && self.start < other.end
    }
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_wall_time(input: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| {
            CoreError::Validation(format!("Invalid time '{input}'. Expected HH:MM"))
        })
}

/// Render a time as `HH:MM`.
pub fn format_wall_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
