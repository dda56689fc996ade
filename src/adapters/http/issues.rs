//! `GET /api/v1/projects/{id}/issues`.
//!
//! Issues are reported as JSON:API resource objects with a relationship
//! back to the queried project.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::domain::models::{Issue, IssueId};

use super::error::ApiResult;
use super::extract::Caller;
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct IssueResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: IssueId,
    pub attributes: IssueAttributes,
    pub relationships: IssueRelationships,
}

#[derive(Debug, Serialize)]
pub struct IssueAttributes {
    /// Tracker label, `Github` or `Redmine`.
    #[serde(rename = "type")]
    pub source_type: &'static str,
    pub title: String,
    pub url: String,
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct IssueRelationships {
    pub project: Relationship,
}

#[derive(Debug, Serialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: i64,
}

impl From<Issue> for IssueResource {
    fn from(issue: Issue) -> Self {
        Self {
            kind: "issues",
            id: issue.id,
            attributes: IssueAttributes {
                source_type: issue.source.source_label(),
                title: issue.title,
                url: issue.url,
                state: issue.state,
            },
            relationships: IssueRelationships {
                project: Relationship {
                    data: ResourceIdentifier {
                        kind: "projects",
                        id: issue.project_id,
                    },
                },
            },
        }
    }
}

pub async fn list_project_issues(
    State(state): State<Arc<AppState>>,
    Caller(_caller): Caller,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<IssueResource>>> {
    let issues = state.issues.get_issues(project_id).await?;
    Ok(Json(issues.into_iter().map(IssueResource::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TrackerType;
    use serde_json::json;

    #[test]
    fn test_issue_resource_shape() {
        let issue = Issue {
            id: IssueId::Number(1),
            title: "Bug".to_string(),
            url: "https://github.com/adfinis/timed/issues/1".to_string(),
            state: "Open".to_string(),
            source: TrackerType::GitHub,
            project_id: 42,
        };

        let value = serde_json::to_value(IssueResource::from(issue)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "issues",
                "id": 1,
                "attributes": {
                    "type": "Github",
                    "title": "Bug",
                    "url": "https://github.com/adfinis/timed/issues/1",
                    "state": "Open"
                },
                "relationships": {
                    "project": {"data": {"type": "projects", "id": 42}}
                }
            })
        );
    }
}
