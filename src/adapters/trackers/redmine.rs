//! Redmine issue tracker adapter.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{capitalize_state, Issue, Project, TrackerSettings, TrackerType};
use crate::domain::ports::IssueTracker;

use super::client::TrackerClient;
use super::models::{RedmineIssue, RedmineIssueList};
use super::template::render;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-redmine-api-key");

/// Reads a Redmine project's `issues.json` with the project's API key.
///
/// Installations behind HTTP basic auth additionally get an
/// `Authorization: Basic` header built from the configured account.
#[derive(Clone)]
pub struct RedmineAdapter {
    client: TrackerClient,
    api_url: String,
    issue_url: String,
    basic_auth: Option<HeaderValue>,
}

impl RedmineAdapter {
    pub fn new(client: TrackerClient, settings: &TrackerSettings) -> DomainResult<Self> {
        let basic_auth = if settings.redmine_basic_auth_enabled {
            Some(basic_auth_header(
                &settings.redmine_basic_auth_user,
                &settings.redmine_basic_auth_password,
            )?)
        } else {
            None
        };

        Ok(Self {
            client,
            api_url: settings.redmine_api_url.clone(),
            issue_url: settings.redmine_issue_url.clone(),
            basic_auth,
        })
    }

    fn headers(&self, project: &Project) -> DomainResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(project.tracker_api_key())
            .map_err(|_| DomainError::ValidationFailed("Tracker API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        if let Some(basic) = &self.basic_auth {
            headers.insert(AUTHORIZATION, basic.clone());
        }
        Ok(headers)
    }
}

/// `Basic base64(user:password)`, marked sensitive.
pub fn basic_auth_header(user: &str, password: &str) -> DomainResult<HeaderValue> {
    let encoded = STANDARD.encode(format!("{user}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| DomainError::ValidationFailed(format!("Invalid basic auth header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Map Redmine issues onto the normalized shape, keeping upstream order.
pub fn normalize_redmine(issues: Vec<RedmineIssue>, issue_url: &str, project: &Project) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| {
            let id = issue.id.to_string();
            Issue {
                url: render(issue_url, project.tracker_name(), Some(&id)),
                id: issue.id,
                title: issue.subject,
                state: capitalize_state(&issue.status.name),
                source: TrackerType::Redmine,
                project_id: project.id,
            }
        })
        .collect()
}

#[async_trait]
impl IssueTracker for RedmineAdapter {
    fn kind(&self) -> TrackerType {
        TrackerType::Redmine
    }

    async fn fetch_issues(&self, project: &Project) -> DomainResult<Vec<Issue>> {
        let url = render(&self.api_url, project.tracker_name(), None);
        let list: RedmineIssueList = self
            .client
            .get_json(TrackerType::Redmine, &url, self.headers(project)?)
            .await?;

        Ok(normalize_redmine(list.issues, &self.issue_url, project))
    }
}
