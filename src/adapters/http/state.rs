//! Shared state of the HTTP API.

use std::sync::Arc;

use axum::http::HeaderName;
use sqlx::SqlitePool;

use crate::adapters::sqlite::{
    SqliteActivityBlockRepository, SqliteActivityRepository, SqliteAttendanceRepository, SqliteCustomerRepository,
    SqliteProjectRepository, SqliteReportRepository, SqliteTaskRepository, SqliteTaskTemplateRepository,
    SqliteUserRepository,
};
use crate::adapters::trackers::TrackerRegistry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ApiConfig, Config, PageRequest};
use crate::services::{
    ActivityService, AttendanceService, CustomerService, IssueService, ProjectService, ReportService, TaskService,
    UserService,
};

pub struct AppState {
    pub users: UserService<SqliteUserRepository>,
    pub issues: IssueService<SqliteProjectRepository>,
    pub customers: CustomerService<SqliteCustomerRepository>,
    pub projects: ProjectService<SqliteProjectRepository>,
    pub tasks: TaskService<SqliteTaskRepository, SqliteTaskTemplateRepository>,
    pub activities: ActivityService<SqliteActivityRepository, SqliteActivityBlockRepository>,
    pub attendances: AttendanceService<SqliteAttendanceRepository>,
    pub reports: ReportService<SqliteReportRepository>,
    /// Header carrying the proxy-authenticated username.
    pub user_header: HeaderName,
    pub api: ApiConfig,
}

impl AppState {
    /// Wire every service onto the SQLite pool.
    pub fn new(pool: SqlitePool, trackers: TrackerRegistry, config: &Config) -> DomainResult<Self> {
        let user_header = HeaderName::from_bytes(config.server.user_header.trim().to_ascii_lowercase().as_bytes())
            .map_err(|e| DomainError::ValidationFailed(format!("Invalid user header: {e}")))?;

        let projects = Arc::new(SqliteProjectRepository::new(pool.clone()));

        Ok(Self {
            users: UserService::new(Arc::new(SqliteUserRepository::new(pool.clone()))),
            issues: IssueService::new(projects.clone(), trackers),
            customers: CustomerService::new(Arc::new(SqliteCustomerRepository::new(pool.clone()))),
            projects: ProjectService::new(projects),
            tasks: TaskService::new(
                Arc::new(SqliteTaskRepository::new(pool.clone())),
                Arc::new(SqliteTaskTemplateRepository::new(pool.clone())),
            ),
            activities: ActivityService::new(
                Arc::new(SqliteActivityRepository::new(pool.clone())),
                Arc::new(SqliteActivityBlockRepository::new(pool.clone())),
            ),
            attendances: AttendanceService::new(Arc::new(SqliteAttendanceRepository::new(pool.clone()))),
            reports: ReportService::new(Arc::new(SqliteReportRepository::new(pool))),
            user_header,
            api: config.api.clone(),
        })
    }

    /// Page request from optional query values, using the configured sizes.
    pub fn page_request(&self, page: Option<u32>, page_size: Option<u32>) -> PageRequest {
        PageRequest::new(
            page.unwrap_or(1),
            page_size.unwrap_or(self.api.default_page_size),
            self.api.max_page_size,
        )
    }
}
