//! Issue tracker adapters.
//!
//! Implementations of the [`IssueTracker`](crate::domain::ports::IssueTracker)
//! port for GitHub and Redmine, plus the registry that selects one by
//! tracker type.

pub mod client;
pub mod github;
pub mod models;
pub mod redmine;
pub mod registry;
pub mod template;

pub use client::TrackerClient;
pub use github::{normalize_github, GitHubAdapter};
pub use models::{GitHubIssue, RedmineIssue, RedmineIssueList, RedmineStatus};
pub use redmine::{normalize_redmine, RedmineAdapter};
pub use registry::TrackerRegistry;
