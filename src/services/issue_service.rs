//! Issue lookup gateway.
//!
//! Resolves a project's tracker configuration and returns the tracker's
//! issue list in normalized form. Nothing is cached; every call reads the
//! project and performs one outbound lookup.

use std::sync::Arc;

use crate::adapters::trackers::TrackerRegistry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Issue;
use crate::domain::ports::ProjectRepository;

pub struct IssueService<P: ProjectRepository> {
    projects: Arc<P>,
    trackers: TrackerRegistry,
}

impl<P: ProjectRepository> IssueService<P> {
    pub fn new(projects: Arc<P>, trackers: TrackerRegistry) -> Self {
        Self { projects, trackers }
    }

    /// Fetch the issues of a project's tracker, in upstream order.
    ///
    /// A project without a tracker, or with a tracker no adapter is
    /// registered for, has no issues.
    pub async fn get_issues(&self, project_id: i64) -> DomainResult<Vec<Issue>> {
        let project = self
            .projects
            .get(project_id)
            .await?
            .ok_or(DomainError::not_found("Project", project_id))?;

        let Some(kind) = project.tracker_type else {
            tracing::debug!(project_id, "project has no issue tracker");
            return Ok(Vec::new());
        };

        let Some(tracker) = self.trackers.get(kind) else {
            tracing::warn!(project_id, tracker = %kind, "no adapter registered for tracker");
            return Ok(Vec::new());
        };

        let issues = tracker.fetch_issues(&project).await?;
        tracing::info!(project_id, tracker = %kind, issue_count = issues.len(), "fetched tracker issues");
        Ok(issues)
    }
}
