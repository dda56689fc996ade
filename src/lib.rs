//! Timed - time-tracking API backend
//!
//! Timed records customers, projects, tasks, activities, attendances and
//! reports per user, and looks up the issues of a project's external
//! tracker (GitHub or Redmine) on demand.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): Business rules on top of the ports
//! - **Adapters** (`adapters`): SQLite persistence, tracker clients, HTTP API
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Activity, ActivityBlock, Attendance, Config, Customer, Issue, IssueId, Page, PageRequest, Project, Report, Task,
    TaskTemplate, TrackerSettings, TrackerType, User,
};
pub use domain::ports::IssueTracker;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::IssueService;
