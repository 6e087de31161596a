/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Review ids are opaque tokens (UUID v7) rather than sequential keys.
pub type ReviewId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
