//! Normalized issue model.
//!
//! Issues are never persisted. They are built from a tracker response on
//! every lookup and always point back at the project that was queried.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TrackerType;

/// Tracker-native issue identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueId {
    Number(u64),
    Text(String),
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for IssueId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

/// An issue from an external tracker, in the shape the API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub url: String,
    /// Human-readable state, see [`capitalize_state`].
    pub state: String,
    pub source: TrackerType,
    /// Project the issue was looked up for.
    pub project_id: i64,
}

/// Capitalize a tracker state for display.
///
/// The first character is upper-cased and the remainder lower-cased, so
/// `"open"` becomes `"Open"` and `"IN PROGRESS"` becomes `"In progress"`.
pub fn capitalize_state(state: &str) -> String {
    let mut chars = state.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
