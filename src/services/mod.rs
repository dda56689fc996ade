//! Service layer: business rules on top of the repository and tracker ports.

pub mod catalog_service;
pub mod issue_service;
pub mod timesheet_service;
pub mod user_service;

pub use catalog_service::{CustomerService, ProjectService, TaskService};
pub use issue_service::IssueService;
pub use timesheet_service::{ActivityService, AttendanceService, ReportService};
pub use user_service::UserService;
