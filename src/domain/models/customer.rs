//! Customer domain model.

use serde::{Deserialize, Serialize};

/// A customer owning projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub archived: bool,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: String::new(),
            website: String::new(),
            comment: String::new(),
            archived: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Customer name cannot be empty".to_string());
        }
        Ok(())
    }
}
