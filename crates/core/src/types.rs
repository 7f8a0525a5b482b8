/// Reservation and report primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids are issued by the identity provider as UUIDs.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
