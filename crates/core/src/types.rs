/// Primary key type for every table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Timestamps are always UTC; serialized as RFC 3339.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
