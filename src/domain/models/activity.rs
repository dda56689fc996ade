//! Activity and activity block domain models.
//!
//! An activity is something a user works on; its blocks are the time spans
//! actually spent on it. A block without an end is still running, and an
//! activity with such a block is considered active.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A tracked activity owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub comment: String,
    pub start_datetime: DateTime<Utc>,
}

impl Activity {
    pub fn new(user_id: i64, start_datetime: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            task_id: None,
            comment: String::new(),
            start_datetime,
        }
    }

    pub fn with_task(mut self, task_id: i64) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A span of time spent on an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBlock {
    pub id: i64,
    pub activity_id: i64,
    pub from_datetime: DateTime<Utc>,
    #[serde(default)]
    pub to_datetime: Option<DateTime<Utc>>,
}

impl ActivityBlock {
    /// Start a running block.
    pub fn start(activity_id: i64, from_datetime: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            activity_id,
            from_datetime,
            to_datetime: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.to_datetime.is_none()
    }

    /// Elapsed time of a closed block. Running blocks have no duration yet.
    pub fn duration(&self) -> Option<Duration> {
        self.to_datetime.map(|to| to - self.from_datetime)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.to_datetime {
            Some(to) if to < self.from_datetime => Err(format!(
                "Block ends ({}) before it starts ({})",
                to.to_rfc3339(),
                self.from_datetime.to_rfc3339()
            )),
            _ => Ok(()),
        }
    }
}
