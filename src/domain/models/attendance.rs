//! Attendance domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presence of a user at work between two points in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub user_id: i64,
    pub from_datetime: DateTime<Utc>,
    pub to_datetime: DateTime<Utc>,
}

impl Attendance {
    pub fn new(user_id: i64, from_datetime: DateTime<Utc>, to_datetime: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            from_datetime,
            to_datetime,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.to_datetime < self.from_datetime {
            return Err("Attendance ends before it starts".to_string());
        }
        Ok(())
    }
}
