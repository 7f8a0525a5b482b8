//! Bookable-date policy and date navigation.
//!
//! By default bookings are open from today up to seven business days ahead,
//! weekends excluded. Both limits are configurable.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Default number of business days ahead that may be booked.
pub const DEFAULT_HORIZON_BUSINESS_DAYS: u32 = 7;

/// Upper bound on day steps when searching for the next/previous bookable date.
pub const MAX_NAVIGATION_STEPS: u32 = 31;

/// Which calendar days accept new reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// `None` disables the horizon.
    pub horizon_business_days: Option<u32>,
    pub weekdays_only: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            horizon_business_days: Some(DEFAULT_HORIZON_BUSINESS_DAYS),
            weekdays_only: true,
        }
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl BookingPolicy {
    /// No horizon and weekends allowed. Only the past is off limits.
    pub fn unrestricted() -> Self {
        Self {
            horizon_business_days: None,
            weekdays_only: false,
        }
    }

    /// The furthest bookable date, counting only weekdays after `today`.
    pub fn last_bookable_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let horizon = self.horizon_business_days?;
        let mut date = today;
        let mut added = 0;
        while added < horizon {
            date = date.checked_add_days(Days::new(1))?;
            if !is_weekend(date) {
                added += 1;
            }
        }
        Some(date)
    }

    /// Whether `date` may be booked, ignoring the past (see [`Self::allows`]).
    pub fn within_window(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.weekdays_only && is_weekend(date) {
            return false;
        }
        match self.last_bookable_date(today) {
            Some(last) => date <= last,
            None => true,
        }
    }

    /// Whether `date` is today or later and inside the window.
    pub fn allows(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && self.within_window(date, today)
    }

    /// The first bookable date strictly after `from`.
    pub fn next_bookable(&self, from: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
        self.step(from, today, |d| d.checked_add_days(Days::new(1)))
    }

    /// The last bookable date strictly before `from`.
    pub fn previous_bookable(&self, from: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
        self.step(from, today, |d| d.checked_sub_days(Days::new(1)))
    }

    fn step(
        &self,
        from: NaiveDate,
        today: NaiveDate,
        advance: impl Fn(NaiveDate) -> Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        let mut date = from;
        for _ in 0..MAX_NAVIGATION_STEPS {
            date = advance(date)?;
            if self.allows(date, today) {
                return Some(date);
            }
        }
        None
    }
}
