//! Booking validator: the sole write gate for reservation creation.
//!
//! [`create_reservation`] enforces, in order:
//!
//! 1. the date is not in the past,
//! 2. for today, a requested end time has not already passed,
//! 3. the resource exists (its type is taken from the catalog, never from
//!    the client),
//! 4. desk/room dates fall inside the configured booking window,
//! 5. the effective time window is well formed and, for today, has not
//!    already ended,
//! 6. the resource is active,
//! 7. the user holds no other reservation of the same type that day,
//! 8. the resource is free for the requested window (full-day types: free
//!    for the whole day),
//!
//! then inserts. Steps 7-8 are check-then-insert; the store is expected to
//! back them with storage constraints and report violations through
//! [`BookingStore::classify_insert_error`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::calendar::BookingPolicy;
use crate::clock::Clock;
use crate::reservation::{Actor, NewReservation, Reservation};
use crate::resource::{Resource, ResourceType};
use crate::time_window::{format_wall_time, TimeWindow};
use crate::types::{DbId, UserId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a booking request was refused. Each variant is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    #[error("Cannot book for a past date ({date})")]
    PastDate { date: NaiveDate },

    #[error("The requested end time {} has already passed today", format_wall_time(*.end_time))]
    PastTime { end_time: NaiveTime },

    #[error("{date} is outside the bookable period")]
    OutsideBookingWindow { date: NaiveDate },

    #[error(
        "Start time {} must be before end time {}",
        format_wall_time(*.start),
        format_wall_time(*.end)
    )]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Resource '{resource_id}' does not exist")]
    UnknownResource { resource_id: String },

    #[error("Resource '{resource_id}' is currently unavailable")]
    InactiveResource {
        resource_id: String,
        reason: Option<String>,
    },

    #[error("You already have a {} reservation on {date}", .resource_type.label())]
    DuplicateUserBooking {
        resource_type: ResourceType,
        date: NaiveDate,
    },

    #[error("Resource '{resource_id}' is already booked for this time")]
    Conflict { resource_id: String },
}

/// Failure of a validator operation: either a rule rejection or a store error.
#[derive(Debug, thiserror::Error)]
pub enum BookingError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Rejected(#[from] BookingRejection),

    #[error("Only the owner or an administrator can cancel reservation {reservation_id}")]
    NotOwner { reservation_id: DbId },

    #[error("Booking store failure: {0}")]
    Store(#[source] E),
}

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// The persistence operations the validator needs.
#[async_trait]
pub trait BookingStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn find_resource(&self, resource_id: &str) -> Result<Option<Resource>, Self::Error>;

    /// Non-test reservations held by `user_id` on `date` for any resource of `resource_type`.
    async fn user_reservations_of_type(
        &self,
        user_id: UserId,
        date: NaiveDate,
        resource_type: ResourceType,
    ) -> Result<Vec<Reservation>, Self::Error>;

    /// All reservations against `resource_id` on `date`.
    async fn resource_reservations(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, Self::Error>;

    async fn insert_reservation(&self, new: &NewReservation) -> Result<Reservation, Self::Error>;

    async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, Self::Error>;

    /// Returns `false` when no row was deleted.
    async fn delete_reservation(&self, id: DbId) -> Result<bool, Self::Error>;

    /// Translate a storage-level constraint violation raised by
    /// [`Self::insert_reservation`] into the rejection it enforces.
    fn classify_insert_error(
        &self,
        _error: &Self::Error,
        _new: &NewReservation,
    ) -> Option<BookingRejection> {
        None
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// A request to book a resource. Times are optional; see [`effective_window`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub user_id: UserId,
    pub resource_id: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_test: bool,
}

/// The window actually booked for a resource type.
///
/// Full-day types always book 00:00-23:59. Partial-day types use the
/// requested times, falling back to 09:00-17:00 for any missing bound.
pub fn effective_window(
    resource_type: ResourceType,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> TimeWindow {
    if resource_type.is_full_day() {
        return TimeWindow::full_day();
    }
    let default = TimeWindow::default_partial_day();
    TimeWindow::new(start.unwrap_or(default.start), end.unwrap_or(default.end))
}

/// Checks that need only the request and the clock: the date is not past
/// and an explicitly requested end time has not already elapsed today.
pub fn check_request_time(
    request: &BookingRequest,
    now: chrono::NaiveDateTime,
) -> Result<(), BookingRejection> {
    if request.date < now.date() {
        return Err(BookingRejection::PastDate { date: request.date });
    }
    if let Some(end_time) = request.end_time {
        if request.date == now.date() && end_time <= now.time() {
            return Err(BookingRejection::PastTime { end_time });
        }
    }
    Ok(())
}

/// The booking window restricts desk/room dates only. Full-day types are
/// bookable on any date from today on.
pub fn check_booking_window(
    resource_type: ResourceType,
    date: NaiveDate,
    today: NaiveDate,
    policy: &BookingPolicy,
) -> Result<(), BookingRejection> {
    if !resource_type.is_full_day() && !policy.within_window(date, today) {
        return Err(BookingRejection::OutsideBookingWindow { date });
    }
    Ok(())
}

/// Window sanity and same-day expiry.
pub fn check_window(
    window: &TimeWindow,
    date: NaiveDate,
    now: chrono::NaiveDateTime,
) -> Result<(), BookingRejection> {
    if !window.is_well_formed() {
        return Err(BookingRejection::InvalidTimeRange {
            start: window.start,
            end: window.end,
        });
    }
    if date == now.date() && window.end <= now.time() {
        return Err(BookingRejection::PastTime {
            end_time: window.end,
        });
    }
    Ok(())
}

/// Whether an existing reservation blocks `window` on the same resource.
pub fn conflicts_with(
    resource_type: ResourceType,
    window: &TimeWindow,
    existing: &Reservation,
) -> bool {
    resource_type.is_full_day() || existing.window().overlaps(window)
}

/// Validate and persist a reservation.
pub async fn create_reservation<S: BookingStore + ?Sized>(
    store: &S,
    clock: &dyn Clock,
    policy: &BookingPolicy,
    request: BookingRequest,
) -> Result<Reservation, BookingError<S::Error>> {
    let now = clock.now();
    check_request_time(&request, now)?;

    let resource = store
        .find_resource(&request.resource_id)
        .await
        .map_err(BookingError::Store)?
        .ok_or_else(|| BookingRejection::UnknownResource {
            resource_id: request.resource_id.clone(),
        })?;
    let resource_type = resource.resource_type;
    check_booking_window(resource_type, request.date, now.date(), policy)?;

    let window = effective_window(resource_type, request.start_time, request.end_time);
    check_window(&window, request.date, now)?;

    if !resource.is_bookable() {
        return Err(BookingRejection::InactiveResource {
            resource_id: resource.id,
            reason: resource.block_reason,
        }
        .into());
    }

    if !request.is_test {
        let held = store
            .user_reservations_of_type(request.user_id, request.date, resource_type)
            .await
            .map_err(BookingError::Store)?;
        if !held.is_empty() {
            return Err(BookingRejection::DuplicateUserBooking {
                resource_type,
                date: request.date,
            }
            .into());
        }
    }

    let existing = store
        .resource_reservations(&resource.id, request.date)
        .await
        .map_err(BookingError::Store)?;
    if existing
        .iter()
        .any(|r| conflicts_with(resource_type, &window, r))
    {
        return Err(BookingRejection::Conflict {
            resource_id: resource.id,
        }
        .into());
    }

    let new = NewReservation {
        user_id: request.user_id,
        resource_id: resource.id,
        resource_type,
        date: request.date,
        window,
        is_test: request.is_test,
    };

    match store.insert_reservation(&new).await {
        Ok(reservation) => Ok(reservation),
        Err(err) => match store.classify_insert_error(&err, &new) {
            Some(rejection) => Err(rejection.into()),
            None => Err(BookingError::Store(err)),
        },
    }
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// Result of a cancellation request.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(Reservation),
    /// The reservation did not exist (or was removed concurrently).
    AlreadyGone,
}

/// Delete a reservation on behalf of its owner or an administrator.
///
/// Cancelling a reservation that no longer exists succeeds with
/// [`CancelOutcome::AlreadyGone`].
pub async fn cancel_reservation<S: BookingStore + ?Sized>(
    store: &S,
    reservation_id: DbId,
    actor: Actor,
) -> Result<CancelOutcome, BookingError<S::Error>> {
    let Some(reservation) = store
        .find_reservation(reservation_id)
        .await
        .map_err(BookingError::Store)?
    else {
        return Ok(CancelOutcome::AlreadyGone);
    };

    if !actor.may_cancel(&reservation) {
        return Err(BookingError::NotOwner { reservation_id });
    }

    let deleted = store
        .delete_reservation(reservation_id)
        .await
        .map_err(BookingError::Store)?;

    Ok(if deleted {
        CancelOutcome::Cancelled(reservation)
    } else {
        CancelOutcome::AlreadyGone
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use chrono::{NaiveDateTime, TimeZone, Utc};

    use super::*;
    use crate::clock::FixedClock;
    use crate::resource::Position;

    #[derive(Debug, thiserror::Error)]
    #[error("store offline")]
    pub struct StoreDown;

    /// In-memory store with an optional unique-constraint emulation.
    #[derive(Default)]
    pub struct MemoryStore {
        pub resources: Mutex<Vec<Resource>>,
        pub reservations: Mutex<Vec<Reservation>>,
        pub offline: bool,
    }

    impl MemoryStore {
        pub fn with_resources(resources: Vec<Resource>) -> Self {
            Self {
                resources: Mutex::new(resources),
                ..Default::default()
            }
        }

        fn check(&self) -> Result<(), StoreDown> {
            if self.offline {
                Err(StoreDown)
            } else {
                Ok(())
            }
        }

        pub fn count(&self) -> usize {
            self.reservations.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        type Error = StoreDown;

        async fn find_resource(&self, resource_id: &str) -> Result<Option<Resource>, StoreDown> {
            self.check()?;
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == resource_id)
                .cloned())
        }

        async fn user_reservations_of_type(
            &self,
            user_id: UserId,
            date: NaiveDate,
            resource_type: ResourceType,
        ) -> Result<Vec<Reservation>, StoreDown> {
            self.check()?;
            Ok(self
                .reservations
                .lock()
                .unwrap()
                .iter()
                .filter(|r| {
                    r.user_id == user_id
                        && r.date == date
                        && r.resource_type == resource_type
                        && !r.is_test
                })
                .cloned()
                .collect())
        }

        async fn resource_reservations(
            &self,
            resource_id: &str,
            date: NaiveDate,
        ) -> Result<Vec<Reservation>, StoreDown> {
            self.check()?;
            Ok(self
                .reservations
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.resource_id == resource_id && r.date == date)
                .cloned()
                .collect())
        }

        async fn insert_reservation(&self, new: &NewReservation) -> Result<Reservation, StoreDown> {
            self.check()?;
            let mut rows = self.reservations.lock().unwrap();
            let reservation = Reservation {
                id: rows.len() as DbId + 1,
                user_id: new.user_id,
                resource_id: new.resource_id.clone(),
                resource_type: new.resource_type,
                date: new.date,
                start_time: new.window.start,
                end_time: new.window.end,
                is_test: new.is_test,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            };
            rows.push(reservation.clone());
            Ok(reservation)
        }

        async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, StoreDown> {
            self.check()?;
            Ok(self
                .reservations
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn delete_reservation(&self, id: DbId) -> Result<bool, StoreDown> {
            self.check()?;
            let mut rows = self.reservations.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }

    pub fn resource(id: &str, resource_type: ResourceType) -> Resource {
        Resource {
            id: id.to_string(),
            resource_type,
            name: id.to_string(),
            capacity: 1,
            position: Position::default(),
            is_active: true,
            block_reason: None,
            block_until: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        crate::time_window::parse_wall_time(s).unwrap()
    }

    fn at(s: &str) -> FixedClock {
        FixedClock(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap())
    }

    fn user(n: u128) -> UserId {
        uuid::Uuid::from_u128(n)
    }

    fn request(user_id: UserId, resource_id: &str, day: &str, start: &str, end: &str) -> BookingRequest {
        BookingRequest {
            user_id,
            resource_id: resource_id.to_string(),
            date: date(day),
            start_time: Some(time(start)),
            end_time: Some(time(end)),
            is_test: false,
        }
    }

    fn catalog() -> MemoryStore {
        MemoryStore::with_resources(vec![
            resource("bureau_flex_1", ResourceType::Desk),
            resource("bureau_flex_2", ResourceType::Desk),
            resource("salle_reunion_1", ResourceType::Room),
            resource("place_1", ResourceType::Slot),
            resource("place_baby_1", ResourceType::Baby),
        ])
    }

    // Sunday the 9th, so Monday the 10th is in the future.
    const EARLIER: &str = "2024-06-09 10:00";

    async fn book(
        store: &MemoryStore,
        clock: &str,
        req: BookingRequest,
    ) -> Result<Reservation, BookingError<StoreDown>> {
        create_reservation(store, &at(clock), &BookingPolicy::unrestricted(), req).await
    }

    // -- Successful booking -------------------------------------------------

    #[tokio::test]
    async fn books_free_desk_with_requested_window() {
        let store = catalog();
        let r = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap();

        assert_eq!(r.resource_id, "bureau_flex_1");
        assert_eq!(r.resource_type, ResourceType::Desk);
        assert_eq!(r.user_id, user(1));
        assert_eq!(r.window(), TimeWindow::new(time("09:00"), time("12:00")));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn type_comes_from_catalog() {
        let store = MemoryStore::with_resources(vec![resource("bureau_flex_9", ResourceType::Room)]);
        let r = book(&store, EARLIER, request(user(1), "bureau_flex_9", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap();
        assert_eq!(r.resource_type, ResourceType::Room);
    }

    #[tokio::test]
    async fn missing_times_default_to_office_hours() {
        let store = catalog();
        let mut req = request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "10:00");
        req.start_time = None;
        req.end_time = None;
        let r = book(&store, EARLIER, req).await.unwrap();
        assert_eq!(r.window(), TimeWindow::default_partial_day());
    }

    #[tokio::test]
    async fn full_day_types_are_normalised() {
        let store = catalog();
        let r = book(&store, EARLIER, request(user(1), "place_1", "2024-06-10", "10:00", "11:00"))
            .await
            .unwrap();
        assert_eq!(r.window(), TimeWindow::full_day());
    }

    // -- Temporal validity --------------------------------------------------

    #[tokio::test]
    async fn past_date_rejected_even_for_unknown_resource() {
        let store = catalog();
        let err = book(&store, "2024-06-10 08:00", request(user(1), "ghost", "2024-06-07", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::PastDate { .. }));
    }

    #[tokio::test]
    async fn same_day_elapsed_end_time_rejected() {
        let store = catalog();
        let err = book(&store, "2024-06-10 12:00", request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::PastTime { .. }));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn same_day_future_end_time_accepted() {
        let store = catalog();
        let r = book(&store, "2024-06-10 12:00", request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "12:01"))
            .await;
        assert!(r.is_ok());
    }

    #[tokio::test]
    async fn inverted_window_rejected() {
        let store = catalog();
        let err = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "14:00", "10:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::InvalidTimeRange { .. }));
    }

    #[tokio::test]
    async fn booking_window_policy_applies() {
        let store = catalog();
        // Saturday with weekdays-only policy.
        let err = create_reservation(
            &store,
            &at(EARLIER),
            &BookingPolicy::default(),
            request(user(1), "bureau_flex_1", "2024-06-15", "09:00", "10:00"),
        )
        .await
        .unwrap_err();
        assert_matches!(
            err,
            BookingError::Rejected(BookingRejection::OutsideBookingWindow { .. })
        );
    }

    #[tokio::test]
    async fn full_day_types_ignore_booking_window() {
        let store = catalog();
        let friday = at("2024-06-14 10:00");
        let policy = BookingPolicy::default();

        let saturday = create_reservation(
            &store,
            &friday,
            &policy,
            request(user(1), "place_1", "2024-06-15", "00:00", "23:59"),
        )
        .await;
        assert!(saturday.is_ok());

        let far_ahead = create_reservation(
            &store,
            &friday,
            &policy,
            request(user(1), "place_baby_1", "2024-07-15", "00:00", "23:59"),
        )
        .await;
        assert!(far_ahead.is_ok());

        let desk = create_reservation(
            &store,
            &friday,
            &policy,
            request(user(2), "bureau_flex_1", "2024-06-15", "09:00", "10:00"),
        )
        .await
        .unwrap_err();
        assert_matches!(
            desk,
            BookingError::Rejected(BookingRejection::OutsideBookingWindow { .. })
        );
        assert_eq!(store.count(), 2);
    }

    #[tokio::test]
    async fn elapsed_end_time_rejected_before_resource_lookup() {
        let store = MemoryStore::with_resources(vec![]);
        let err = book(&store, "2024-06-10 15:00", request(user(1), "ghost", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::PastTime { .. }));
    }

    // -- Resource state -----------------------------------------------------

    #[tokio::test]
    async fn unknown_resource_rejected() {
        let store = catalog();
        let err = book(&store, EARLIER, request(user(1), "bureau_flex_99", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            BookingError::Rejected(BookingRejection::UnknownResource { resource_id }) if resource_id == "bureau_flex_99"
        );
    }

    #[tokio::test]
    async fn inactive_resource_rejected_even_when_free() {
        let mut blocked = resource("bureau_flex_1", ResourceType::Desk);
        blocked.is_active = false;
        blocked.block_reason = Some("Broken screen".into());
        let store = MemoryStore::with_resources(vec![blocked]);

        let err = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            BookingError::Rejected(BookingRejection::InactiveResource { reason: Some(r), .. }) if r == "Broken screen"
        );
    }

    // -- Per-user exclusivity -----------------------------------------------

    #[tokio::test]
    async fn second_desk_same_day_rejected_but_other_types_allowed() {
        let store = catalog();
        let day = "2024-06-10";
        book(&store, EARLIER, request(user(1), "bureau_flex_1", day, "09:00", "12:00"))
            .await
            .unwrap();

        let err = book(&store, EARLIER, request(user(1), "bureau_flex_2", day, "13:00", "17:00"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            BookingError::Rejected(BookingRejection::DuplicateUserBooking {
                resource_type: ResourceType::Desk,
                ..
            })
        );

        for id in ["salle_reunion_1", "place_1", "place_baby_1"] {
            assert!(
                book(&store, EARLIER, request(user(1), id, day, "09:00", "10:00")).await.is_ok(),
                "{id} should still be bookable"
            );
        }
    }

    #[tokio::test]
    async fn same_type_on_another_day_allowed() {
        let store = catalog();
        book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap();
        assert!(
            book(&store, EARLIER, request(user(1), "bureau_flex_2", "2024-06-11", "09:00", "12:00"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_reservations_skip_per_user_rule() {
        let store = catalog();
        for id in ["bureau_flex_1", "bureau_flex_2"] {
            let mut req = request(user(1), id, "2024-06-10", "09:00", "17:00");
            req.is_test = true;
            assert!(book(&store, EARLIER, req).await.is_ok());
        }
    }

    // -- Resource conflicts -------------------------------------------------

    #[tokio::test]
    async fn overlapping_desk_window_conflicts() {
        let store = catalog();
        book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap();

        let err = book(&store, EARLIER, request(user(2), "bureau_flex_1", "2024-06-10", "11:00", "14:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::Conflict { .. }));
    }

    #[tokio::test]
    async fn adjacent_room_windows_do_not_conflict() {
        let store = catalog();
        book(&store, EARLIER, request(user(1), "salle_reunion_1", "2024-06-10", "09:00", "12:00"))
            .await
            .unwrap();
        assert!(
            book(&store, EARLIER, request(user(2), "salle_reunion_1", "2024-06-10", "12:00", "14:00"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn full_day_resource_taken_regardless_of_times() {
        let store = catalog();
        book(&store, EARLIER, request(user(1), "place_baby_1", "2024-06-10", "08:00", "09:00"))
            .await
            .unwrap();

        let err = book(&store, EARLIER, request(user(2), "place_baby_1", "2024-06-10", "18:00", "19:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Rejected(BookingRejection::Conflict { .. }));
    }

    #[tokio::test]
    async fn store_failure_is_surfaced() {
        let store = MemoryStore {
            offline: true,
            ..catalog()
        };
        let err = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::Store(StoreDown));
    }

    // -- Cancel -------------------------------------------------------------

    #[tokio::test]
    async fn owner_and_admin_can_cancel() {
        let store = catalog();
        let a = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap();
        let b = book(&store, EARLIER, request(user(2), "bureau_flex_2", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap();

        let owner = cancel_reservation(&store, a.id, Actor::new(user(1), false)).await.unwrap();
        assert_matches!(owner, CancelOutcome::Cancelled(r) if r.id == a.id);

        let admin = cancel_reservation(&store, b.id, Actor::new(user(3), true)).await.unwrap();
        assert_matches!(admin, CancelOutcome::Cancelled(_));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn stranger_cannot_cancel() {
        let store = catalog();
        let a = book(&store, EARLIER, request(user(1), "bureau_flex_1", "2024-06-10", "09:00", "10:00"))
            .await
            .unwrap();

        let err = cancel_reservation(&store, a.id, Actor::new(user(2), false))
            .await
            .unwrap_err();
        assert_matches!(err, BookingError::NotOwner { reservation_id } if reservation_id == a.id);
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn cancelling_missing_reservation_is_a_no_op() {
        let store = catalog();
        let outcome = cancel_reservation(&store, 404, Actor::new(user(1), false))
            .await
            .unwrap();
        assert_eq!(outcome, CancelOutcome::AlreadyGone);
    }

    #[test]
    fn rejection_messages_name_the_problem() {
        let msg = BookingRejection::DuplicateUserBooking {
            resource_type: ResourceType::Slot,
            date: date("2024-06-10"),
        }
        .to_string();
        assert_eq!(msg, "You already have a parking slot reservation on 2024-06-10");

        let msg = BookingRejection::PastTime {
            end_time: time("12:00"),
        }
        .to_string();
        assert!(msg.contains("12:00"));
    }
}
