use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deskbook_core::booking::{BookingError, BookingRejection};
use deskbook_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `deskbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<BookingError<sqlx::Error>> for AppError {
    fn from(err: BookingError<sqlx::Error>) -> Self {
        match err {
            BookingError::Rejected(rejection) => AppError::Core(CoreError::Booking(rejection)),
            BookingError::Store(db) => AppError::Database(db),
            not_owner @ BookingError::NotOwner { .. } => {
                AppError::Core(CoreError::Forbidden(not_owner.to_string()))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::from(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Booking(rejection) => {
                    let (status, code) = classify_rejection(rejection);
                    (status, code, rejection.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Status and stable error code for each booking rejection.
fn classify_rejection(rejection: &BookingRejection) -> (StatusCode, &'static str) {
    match rejection {
        BookingRejection::PastDate { .. } => (StatusCode::BAD_REQUEST, "PAST_DATE"),
        BookingRejection::PastTime { .. } => (StatusCode::BAD_REQUEST, "PAST_TIME"),
        BookingRejection::OutsideBookingWindow { .. } => {
            (StatusCode::BAD_REQUEST, "OUTSIDE_BOOKING_WINDOW")
        }
        BookingRejection::InvalidTimeRange { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_TIME_RANGE")
        }
        BookingRejection::UnknownResource { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_RESOURCE"),
        BookingRejection::InactiveResource { .. } => (StatusCode::CONFLICT, "INACTIVE_RESOURCE"),
        BookingRejection::DuplicateUserBooking { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_USER_BOOKING")
        }
        BookingRejection::Conflict { .. } => (StatusCode::CONFLICT, "BOOKING_CONFLICT"),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*` and exclusion violations on `ex_*` map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // PostgreSQL exclusion_violation
                Some("23P01") if constraint.starts_with("ex_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Overlapping value violates exclusion constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
