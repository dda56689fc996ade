//! Project domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TrackerType;

/// A customer project that time is booked against.
///
/// A project may be linked to an external issue tracker. The tracker
/// credential is write-only: it is skipped on serialization and redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub customer_id: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tracker_type: Option<TrackerType>,
    #[serde(default)]
    pub tracker_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub tracker_api_key: Option<String>,
}

impl Project {
    /// Create an unsaved project (id 0) for a customer.
    pub fn new(name: impl Into<String>, customer_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            customer_id,
            comment: String::new(),
            archived: false,
            tracker_type: None,
            tracker_name: None,
            tracker_api_key: None,
        }
    }

    /// Link the project to an issue tracker.
    pub fn with_tracker(
        mut self,
        tracker_type: TrackerType,
        tracker_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        self.tracker_type = Some(tracker_type);
        self.tracker_name = Some(tracker_name.into());
        self.tracker_api_key = Some(api_key.into());
        self
    }

    /// Tracker name, or an empty string when none is set.
    pub fn tracker_name(&self) -> &str {
        self.tracker_name.as_deref().unwrap_or_default()
    }

    /// Tracker credential, or an empty string when none is set.
    pub fn tracker_api_key(&self) -> &str {
        self.tracker_api_key.as_deref().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Project name cannot be empty".to_string());
        }
        if self.tracker_type.is_some() && self.tracker_name().trim().is_empty() {
            return Err("A project with a tracker needs a tracker name".to_string());
        }
        Ok(())
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("customer_id", &self.customer_id)
            .field("archived", &self.archived)
            .field("tracker_type", &self.tracker_type)
            .field("tracker_name", &self.tracker_name)
            .field(
                "tracker_api_key",
                &self.tracker_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}
