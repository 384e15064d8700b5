use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod session_repository;
pub(crate) mod user_repository;

/// Timestamps are stored as UTC milliseconds so range scans and ordering
/// stay purely numeric.
pub(crate) fn to_millis(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn from_millis(value: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| DomainError::Unexpected(format!("invalid stored timestamp: {value}")))
}

pub(crate) fn map_db_error(err: sqlx::Error, resource: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::AlreadyExists(resource.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::NotFound(format!("{resource}: referenced row"));
        }
    }
    DomainError::Unexpected(err.to_string())
}
