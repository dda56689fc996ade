//! Report domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time booked by a user on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub task_id: Option<i64>,
    pub date: NaiveDate,
    /// Booked time in seconds.
    pub duration: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub review: bool,
    #[serde(default)]
    pub not_billable: bool,
}

impl Report {
    pub fn new(user_id: i64, date: NaiveDate, duration: i64) -> Self {
        Self {
            id: 0,
            user_id,
            task_id: None,
            date,
            duration,
            comment: String::new(),
            review: false,
            not_billable: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.duration < 0 {
            return Err(format!("Invalid duration: {}s", self.duration));
        }
        Ok(())
    }
}
