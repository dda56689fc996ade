//! Issue tracker port - read access to an external issue tracker.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, Project, TrackerType};

/// Trait for issue tracker adapters.
///
/// An adapter reads the issue list of the project it is given and returns
/// it normalized, in upstream order. Each call performs its own outbound
/// request; adapters keep no per-project state.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Tracker type this adapter serves.
    fn kind(&self) -> TrackerType;

    /// Fetch the project's issues from the tracker.
    ///
    /// Fails with `AuthenticationFailed` when the tracker rejects the
    /// project's credential, `UpstreamParseError` on any other non-success
    /// status, `UpstreamFormatError` when the payload cannot be decoded and
    /// `TrackerUnavailable` when no response arrives.
    async fn fetch_issues(&self, project: &Project) -> DomainResult<Vec<Issue>>;
}
