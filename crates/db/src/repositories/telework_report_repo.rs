//! Repository for the `tt_reports` table.

use deskbook_core::shortage::NewShortageReport;
use deskbook_core::types::UserId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::telework_report::TeleworkReport;

/// Column list for `tt_reports` queries.
const COLUMNS: &str = "id, user_id, date, reason, details, created_at";

/// Append-only access to forced-telework reports.
pub struct TeleworkReportRepo;

impl TeleworkReportRepo {
    pub async fn create(
        pool: &PgPool,
        report: &NewShortageReport,
    ) -> Result<TeleworkReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO tt_reports (user_id, date, reason, details) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeleworkReport>(&query)
            .bind(report.user_id)
            .bind(report.date)
            .bind(&report.reason)
            .bind(Json(report.details))
            .fetch_one(pool)
            .await
    }

    /// A user's reports, newest date first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<TeleworkReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tt_reports \
             WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC"
        );
        sqlx::query_as::<_, TeleworkReport>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
