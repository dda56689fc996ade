//! Domain errors for the Timed API.

use thiserror::Error;

use super::models::TrackerType;

/// Domain-level errors that can occur in the Timed API.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{tracker} rejected the project credentials")]
    AuthenticationFailed { tracker: TrackerType },

    #[error("{tracker} responded with status {status}")]
    UpstreamParseError { tracker: TrackerType, status: u16 },

    #[error("{tracker} returned an unexpected payload: {reason}")]
    UpstreamFormatError { tracker: TrackerType, reason: String },

    #[error("{tracker} is unreachable: {reason}")]
    TrackerUnavailable { tracker: TrackerType, reason: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        // Constraint violations are caused by the input, not the store.
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return DomainError::ValidationFailed(format!("Duplicate value: {}", db_err.message()));
                }
                ErrorKind::ForeignKeyViolation => {
                    return DomainError::ValidationFailed("Referenced record does not exist".to_string());
                }
                _ => {}
            }
        }
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
