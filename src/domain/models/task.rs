//! Task and task template domain models.

use serde::{Deserialize, Serialize};

/// A unit of work within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    pub fn new(name: impl Into<String>, project_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            project_id,
            estimated_hours: None,
            archived: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Task name cannot be empty".to_string());
        }
        if let Some(hours) = self.estimated_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(format!("Invalid estimated hours: {hours}"));
            }
        }
        Ok(())
    }
}

/// Named template used to pre-populate tasks on new projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: i64,
    pub name: String,
}

impl TaskTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Task template name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_validate_estimate() {
        let mut task = Task::new("Development", 1);
        assert!(task.validate().is_ok());

        task.estimated_hours = Some(-1.0);
        assert!(task.validate().is_err());

        task.estimated_hours = Some(f64::NAN);
        assert!(task.validate().is_err());

        task.estimated_hours = Some(12.5);
        assert!(task.validate().is_ok());
    }
}
