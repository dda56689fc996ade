//! Request extractors.
//!
//! Wrappers around axum's `Query` and `Json` that report malformed input
//! with the API's error body, and the [`Caller`] extractor resolving the
//! proxy-authenticated user.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::domain::errors::DomainError;
use crate::domain::models::User;

use super::error::ApiError;
use super::state::AppState;

/// Usernames longer than this are rejected outright.
const MAX_USERNAME_LEN: usize = 150;

pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
    }
}

pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
    }
}

/// The active user named by the authentication header.
pub struct Caller(pub User);

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let username = header_value(&parts.headers, state.user_header.as_str(), MAX_USERNAME_LEN)
            .ok_or(ApiError::NotAuthenticated)?;

        match state.users.resolve_caller(&username).await? {
            Some(user) => Ok(Self(user)),
            None => {
                tracing::debug!(username = %username, "unknown or inactive user");
                Err(ApiError::NotAuthenticated)
            }
        }
    }
}

/// A trimmed, non-empty header value no longer than `max_len`.
pub fn header_value(headers: &HeaderMap, key: &str, max_len: usize) -> Option<String> {
    let value = headers.get(key)?.to_str().ok()?.trim();
    if value.is_empty() || value.len() > max_len {
        return None;
    }
    Some(value.to_string())
}

/// Query parameters shared by the list endpoints.
///
/// Each endpoint reads the subset it supports and ignores the rest.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub day: Option<String>,
    pub active: Option<String>,
    pub task: Option<i64>,
    pub activity: Option<i64>,
    pub customer: Option<i64>,
    pub project: Option<i64>,
    pub username: Option<String>,
}

impl ListParams {
    /// The `day` filter as a date. Anything but `YYYY-MM-DD` is rejected.
    pub fn day(&self) -> Result<Option<NaiveDate>, ApiError> {
        self.day
            .as_deref()
            .map(|day| {
                NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").map_err(|_| {
                    ApiError::from(DomainError::ValidationFailed(format!(
                        "Invalid day '{day}', expected YYYY-MM-DD"
                    )))
                })
            })
            .transpose()
    }

    /// Whether the `active` filter is switched on.
    pub fn active(&self) -> bool {
        self.active.as_deref().is_some_and(is_truthy)
    }
}

/// `1`, `true` and `yes` in any case. Every other value is false.
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Deserialize a field that distinguishes "absent" from `null`.
///
/// Use with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
