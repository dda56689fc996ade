//! Tracker registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{TrackerSettings, TrackerType};
use crate::domain::ports::IssueTracker;

use super::client::TrackerClient;
use super::github::GitHubAdapter;
use super::redmine::RedmineAdapter;

/// Adapters by tracker type.
#[derive(Clone, Default)]
pub struct TrackerRegistry {
    trackers: HashMap<TrackerType, Arc<dyn IssueTracker>>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the GitHub and Redmine adapters, sharing one HTTP client.
    pub fn from_settings(settings: &TrackerSettings) -> DomainResult<Self> {
        let client = TrackerClient::new(settings)
            .map_err(|e| DomainError::ValidationFailed(format!("Cannot build tracker HTTP client: {e}")))?;

        let mut registry = Self::new();
        registry.register(Arc::new(GitHubAdapter::new(client.clone(), settings)));
        registry.register(Arc::new(RedmineAdapter::new(client, settings)?));
        Ok(registry)
    }

    /// Register an adapter under its own kind, replacing any previous one.
    pub fn register(&mut self, tracker: Arc<dyn IssueTracker>) -> &mut Self {
        self.trackers.insert(tracker.kind(), tracker);
        self
    }

    pub fn get(&self, kind: TrackerType) -> Option<Arc<dyn IssueTracker>> {
        self.trackers.get(&kind).cloned()
    }

    pub fn kinds(&self) -> Vec<TrackerType> {
        let mut kinds: Vec<_> = self.trackers.keys().copied().collect();
        kinds.sort_by_key(|k| k.code());
        kinds
    }
}
