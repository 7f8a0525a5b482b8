//! [`BookingStore`] backed by PostgreSQL.
//!
//! The schema enforces the booking invariants with one exclusion constraint
//! and two partial unique indexes. When a concurrent request slips past the
//! validator's pre-checks, the insert fails on one of them and
//! [`classify_booking_violation`] turns that failure into the matching
//! rejection.

use async_trait::async_trait;
use chrono::NaiveDate;
use deskbook_core::booking::{BookingRejection, BookingStore};
use deskbook_core::reservation::{NewReservation, Reservation};
use deskbook_core::resource::{Resource, ResourceType};
use deskbook_core::types::{DbId, UserId};
use sqlx::PgPool;

use super::{ReservationRepo, ResourceRepo};

/// Partial-day overlap exclusion on `(resource_id, date, [start, end))`.
pub const CONSTRAINT_PARTIAL_DAY_OVERLAP: &str = "ex_reservations_partial_day_overlap";
/// One slot/baby reservation per resource and day.
pub const CONSTRAINT_FULL_DAY: &str = "uq_reservations_full_day";
/// One non-test reservation per user, day, and type.
pub const CONSTRAINT_USER_TYPE_DAY: &str = "uq_reservations_user_type_day";

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_EXCLUSION_VIOLATION: &str = "23P01";

/// Map a booking constraint violation to its rejection.
pub fn classify_booking_violation(
    err: &sqlx::Error,
    new: &NewReservation,
) -> Option<BookingRejection> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let code = db_err.code();
    if !matches!(
        code.as_deref(),
        Some(PG_UNIQUE_VIOLATION) | Some(PG_EXCLUSION_VIOLATION)
    ) {
        return None;
    }

    match db_err.constraint()? {
        CONSTRAINT_USER_TYPE_DAY => Some(BookingRejection::DuplicateUserBooking {
            resource_type: new.resource_type,
            date: new.date,
        }),
        CONSTRAINT_FULL_DAY | CONSTRAINT_PARTIAL_DAY_OVERLAP => Some(BookingRejection::Conflict {
            resource_id: new.resource_id.clone(),
        }),
        _ => None,
    }
}

/// Borrowing adapter from the repositories to the core validator.
#[derive(Clone, Copy)]
pub struct PgBookingStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgBookingStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore<'_> {
    type Error = sqlx::Error;

    async fn find_resource(&self, resource_id: &str) -> Result<Option<Resource>, sqlx::Error> {
        ResourceRepo::find_by_id(self.pool, resource_id).await
    }

    async fn user_reservations_of_type(
        &self,
        user_id: UserId,
        date: NaiveDate,
        resource_type: ResourceType,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        ReservationRepo::list_for_user_and_type(self.pool, user_id, date, resource_type).await
    }

    async fn resource_reservations(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        ReservationRepo::list_for_resource(self.pool, resource_id, date).await
    }

    async fn insert_reservation(&self, new: &NewReservation) -> Result<Reservation, sqlx::Error> {
        ReservationRepo::create(self.pool, new).await
    }

    async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        ReservationRepo::find_by_id(self.pool, id).await
    }

    async fn delete_reservation(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ReservationRepo::delete(self.pool, id).await
    }

    fn classify_insert_error(
        &self,
        error: &sqlx::Error,
        new: &NewReservation,
    ) -> Option<BookingRejection> {
        let rejection = classify_booking_violation(error, new);
        if let Some(ref r) = rejection {
            tracing::warn!(
                resource_id = %new.resource_id,
                user_id = %new.user_id,
                date = %new.date,
                rejection = %r,
                "Booking lost a race at the storage constraint",
            );
        }
        rejection
    }
}
