//! Forced-telework report rows and DTOs.

use chrono::NaiveDate;
use deskbook_core::shortage::ShortageReportDetails;
use deskbook_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `tt_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeleworkReport {
    pub id: DbId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub reason: String,
    pub details: Json<ShortageReportDetails>,
    pub created_at: Timestamp,
}

/// DTO for filing a report about a given date.
#[derive(Debug, Deserialize)]
pub struct CreateTeleworkReport {
    pub date: NaiveDate,
}
