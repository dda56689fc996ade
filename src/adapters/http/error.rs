//! Error responses of the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// No active user could be resolved from the proxy header.
    NotAuthenticated,
    /// Malformed query string or body.
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "not_authenticated"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Domain(err) => match err {
                DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                DomainError::AuthenticationFailed { .. } => (StatusCode::UNAUTHORIZED, "authentication_failed"),
                DomainError::UpstreamParseError { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
                DomainError::UpstreamFormatError { .. } => (StatusCode::BAD_GATEWAY, "upstream_format_error"),
                DomainError::TrackerUnavailable { .. } => (StatusCode::GATEWAY_TIMEOUT, "tracker_unavailable"),
                DomainError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
                DomainError::DatabaseError(_) | DomainError::SerializationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Authentication credentials were not provided".to_string(),
            Self::BadRequest(reason) => reason.clone(),
            // Store errors stay in the log.
            Self::Domain(DomainError::DatabaseError(_) | DomainError::SerializationError(_)) => {
                "Internal server error".to_string()
            }
            Self::Domain(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "request failed");
        } else {
            tracing::debug!(error = ?self, %status, "request rejected");
        }

        let body = ErrorResponse {
            error: self.message(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TrackerType;

    #[test]
    fn test_tracker_errors_map_to_distinct_statuses() {
        let cases = [
            (DomainError::AuthenticationFailed { tracker: TrackerType::GitHub }, StatusCode::UNAUTHORIZED, "authentication_failed"),
            (DomainError::UpstreamParseError { tracker: TrackerType::GitHub, status: 500 }, StatusCode::BAD_REQUEST, "parse_error"),
            (
                DomainError::UpstreamFormatError { tracker: TrackerType::Redmine, reason: "eof".to_string() },
                StatusCode::BAD_GATEWAY,
                "upstream_format_error",
            ),
            (
                DomainError::TrackerUnavailable { tracker: TrackerType::Redmine, reason: "timeout".to_string() },
                StatusCode::GATEWAY_TIMEOUT,
                "tracker_unavailable",
            ),
            (DomainError::not_found("Project", 1), StatusCode::NOT_FOUND, "not_found"),
        ];

        for (err, status, code) in cases {
            assert_eq!(ApiError::from(err).status_and_code(), (status, code));
        }
    }

    #[test]
    fn test_database_details_are_not_exposed() {
        let err = ApiError::from(DomainError::DatabaseError("no such table: users".to_string()));
        assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("users"));
    }
}
