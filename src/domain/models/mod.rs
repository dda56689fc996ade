pub mod activity;
pub mod attendance;
pub mod config;
pub mod customer;
pub mod issue;
pub mod page;
pub mod project;
pub mod report;
pub mod task;
pub mod tracker;
pub mod user;

pub use activity::{Activity, ActivityBlock};
pub use attendance::Attendance;
pub use config::{ApiConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig, TrackerSettings};
pub use customer::Customer;
pub use issue::{capitalize_state, Issue, IssueId};
pub use page::{Page, PageRequest};
pub use project::Project;
pub use report::Report;
pub use task::{Task, TaskTemplate};
pub use tracker::TrackerType;
pub use user::User;
