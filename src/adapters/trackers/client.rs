//! Outbound HTTP shared by the tracker adapters.
//!
//! One `reqwest::Client` (and its connection pool) serves every tracker.
//! Each request is bounded by the configured timeout and retried once when
//! it fails at the network level before a response arrives. An unbuildable
//! request is a validation failure. HTTP status responses are final.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{TrackerSettings, TrackerType};

const USER_AGENT: &str = "timed-api";

#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: Client,
    retry_on_network_error: bool,
}

impl TrackerClient {
    pub fn new(settings: &TrackerSettings) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            retry_on_network_error: settings.retry_on_network_error,
        })
    }

    /// GET `url` and decode a 200 response body as `T`.
    ///
    /// Status 401 fails with `AuthenticationFailed`, any other non-200 with
    /// `UpstreamParseError`. An undecodable body fails with
    /// `UpstreamFormatError`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        tracker: TrackerType,
        url: &str,
        headers: HeaderMap,
    ) -> DomainResult<T> {
        let response = self.send(tracker, url, headers).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%tracker, url, "tracker rejected credentials");
            return Err(DomainError::AuthenticationFailed { tracker });
        }
        if status != StatusCode::OK {
            tracing::warn!(%tracker, url, status = status.as_u16(), "tracker returned error status");
            return Err(DomainError::UpstreamParseError {
                tracker,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| DomainError::TrackerUnavailable {
            tracker,
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| DomainError::UpstreamFormatError {
            tracker,
            reason: e.to_string(),
        })
    }

    async fn send(&self, tracker: TrackerType, url: &str, headers: HeaderMap) -> DomainResult<reqwest::Response> {
        let attempts = if self.retry_on_network_error { 2 } else { 1 };
        let mut reason = String::new();

        for attempt in 1..=attempts {
            tracing::debug!(%tracker, url, attempt, "requesting tracker issues");
            match self.http.get(url).headers(headers.clone()).send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_builder() => {
                    tracing::warn!(%tracker, url, error = %e.without_url(), "invalid tracker request");
                    return Err(DomainError::ValidationFailed(format!("invalid {tracker} request URL: {url}")));
                }
                Err(e) => {
                    let retryable = is_network_failure(&e);
                    reason = e.without_url().to_string();
                    tracing::warn!(%tracker, url, attempt, retryable, error = %reason, "tracker request failed");
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(DomainError::TrackerUnavailable { tracker, reason })
    }
}

/// Failures before any response arrived: refused or dropped connections and
/// timeouts.
fn is_network_failure(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request()
}
