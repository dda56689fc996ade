//! GitHub issue tracker adapter.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{capitalize_state, Issue, Project, TrackerSettings, TrackerType};
use crate::domain::ports::IssueTracker;

use super::client::TrackerClient;
use super::models::GitHubIssue;
use super::template::render;

/// Reads `GET /repos/{owner}/{repo}/issues` with the project's token.
#[derive(Debug, Clone)]
pub struct GitHubAdapter {
    client: TrackerClient,
    api_url: String,
    issue_url: String,
}

impl GitHubAdapter {
    pub fn new(client: TrackerClient, settings: &TrackerSettings) -> Self {
        Self {
            client,
            api_url: settings.github_api_url.clone(),
            issue_url: settings.github_issue_url.clone(),
        }
    }

    fn headers(project: &Project) -> DomainResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("token {}", project.tracker_api_key()))
            .map_err(|_| DomainError::ValidationFailed("Tracker API key is not a valid header value".to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        Ok(headers)
    }
}

/// Map GitHub issues onto the normalized shape, keeping upstream order.
pub fn normalize_github(issues: Vec<GitHubIssue>, issue_url: &str, project: &Project) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| {
            let id = issue.id.to_string();
            Issue {
                url: render(issue_url, project.tracker_name(), Some(&id)),
                id: issue.id,
                title: issue.title,
                state: capitalize_state(&issue.state),
                source: TrackerType::GitHub,
                project_id: project.id,
            }
        })
        .collect()
}

#[async_trait]
impl IssueTracker for GitHubAdapter {
    fn kind(&self) -> TrackerType {
        TrackerType::GitHub
    }

    async fn fetch_issues(&self, project: &Project) -> DomainResult<Vec<Issue>> {
        let url = render(&self.api_url, project.tracker_name(), None);
        let issues: Vec<GitHubIssue> = self
            .client
            .get_json(TrackerType::GitHub, &url, Self::headers(project)?)
            .await?;

        Ok(normalize_github(issues, &self.issue_url, project))
    }
}
