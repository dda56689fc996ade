//! Report repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Page, PageRequest, Report};

/// Filter criteria for listing reports.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub user_id: Option<i64>,
    pub task_id: Option<i64>,
}

/// Repository interface for Report persistence.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: &Report) -> DomainResult<Report>;

    async fn get(&self, id: i64) -> DomainResult<Option<Report>>;

    async fn update(&self, report: &Report) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List reports, most recent date first.
    async fn list(&self, filter: ReportFilter, page: PageRequest) -> DomainResult<Page<Report>>;
}
