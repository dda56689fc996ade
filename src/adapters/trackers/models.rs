//! Wire models for the tracker read APIs.
//!
//! Only the fields the normalization needs are declared; everything else
//! in the upstream payload is ignored.

use serde::Deserialize;

use crate::domain::models::IssueId;

/// An element of the GitHub `GET /repos/{owner}/{repo}/issues` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub id: IssueId,
    pub title: String,
    /// "open" or "closed".
    pub state: String,
}

/// Body of the Redmine `issues.json` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RedmineIssueList {
    pub issues: Vec<RedmineIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedmineIssue {
    pub id: IssueId,
    pub subject: String,
    pub status: RedmineStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedmineStatus {
    pub name: String,
}
