//! Repository for the `reservations` table.

use chrono::NaiveDate;
use deskbook_core::reservation::{AttachedReservation, NewReservation, Reservation};
use deskbook_core::resource::ResourceType;
use deskbook_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::reservation::{
    OwnReservation, OwnReservationRow, ReservationRow, ReservationWithRequesterRow,
};

/// Column list for `reservations` queries.
const COLUMNS: &str = "\
    id, user_id, resource_id, resource_type, date, start_time, end_time, \
    is_test, created_at";

/// The same columns qualified with the `r` alias, for joins.
const COLUMNS_R: &str = "\
    r.id, r.user_id, r.resource_id, r.resource_type, r.date, r.start_time, \
    r.end_time, r.is_test, r.created_at";

/// Provides reservation reads, inserts, and deletes. Rows are never updated.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a validated reservation, returning the stored row.
    pub async fn create(pool: &PgPool, new: &NewReservation) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations \
                (user_id, resource_id, resource_type, date, start_time, end_time, is_test) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(new.user_id)
            .bind(&new.resource_id)
            .bind(new.resource_type.as_str())
            .bind(new.date)
            .bind(new.window.start)
            .bind(new.window.end)
            .bind(new.is_test)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Reservation::from))
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every reservation on `date` with the holder's profile attached.
    ///
    /// Includes reservations whose resource no longer exists; the resolver
    /// drops those.
    pub async fn list_for_date_with_requester(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<AttachedReservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_R}, p.display_name, p.avatar_url \
             FROM reservations r \
             LEFT JOIN profiles p ON p.id = r.user_id \
             WHERE r.date = $1 \
             ORDER BY r.resource_id, r.start_time"
        );
        let rows = sqlx::query_as::<_, ReservationWithRequesterRow>(&query)
            .bind(date)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AttachedReservation::from).collect())
    }

    /// Non-test reservations held by a user on a date for one resource type.
    pub async fn list_for_user_and_type(
        pool: &PgPool,
        user_id: UserId,
        date: NaiveDate,
        resource_type: ResourceType,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE user_id = $1 AND date = $2 AND resource_type = $3 AND NOT is_test"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(user_id)
            .bind(date)
            .bind(resource_type.as_str())
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    pub async fn list_for_resource(
        pool: &PgPool,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE resource_id = $1 AND date = $2 \
             ORDER BY start_time"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(resource_id)
            .bind(date)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Whether any reservation, on any date, still names `resource_id`.
    pub async fn exists_for_resource(pool: &PgPool, resource_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE resource_id = $1)",
        )
        .bind(resource_id)
        .fetch_one(pool)
        .await
    }

    /// A user's reservations on or after `from`, soonest first, with resource names.
    pub async fn list_for_user_from(
        pool: &PgPool,
        user_id: UserId,
        from: NaiveDate,
    ) -> Result<Vec<OwnReservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_R}, res.name AS resource_name \
             FROM reservations r \
             LEFT JOIN resources res ON res.id = r.resource_id \
             WHERE r.user_id = $1 AND r.date >= $2 \
             ORDER BY r.date, r.start_time"
        );
        let rows = sqlx::query_as::<_, OwnReservationRow>(&query)
            .bind(user_id)
            .bind(from)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(OwnReservation::from).collect())
    }

    /// Delete every simulation reservation owned by `user_id`.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_test_for_user(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE is_test AND user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
