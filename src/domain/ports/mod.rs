//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - Repositories: SQLite persistence for every resource
//! - IssueTracker: read access to GitHub and Redmine
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod activity_repository;
pub mod attendance_repository;
pub mod issue_tracker;
pub mod project_repository;
pub mod report_repository;
pub mod task_repository;
pub mod user_repository;

pub use activity_repository::{
    ActivityBlockFilter, ActivityBlockRepository, ActivityFilter, ActivityRepository,
};
pub use attendance_repository::{AttendanceFilter, AttendanceRepository};
pub use issue_tracker::IssueTracker;
pub use project_repository::{CustomerFilter, CustomerRepository, ProjectFilter, ProjectRepository};
pub use report_repository::{ReportFilter, ReportRepository};
pub use task_repository::{TaskFilter, TaskRepository, TaskTemplateRepository};
pub use user_repository::{UserFilter, UserRepository};
