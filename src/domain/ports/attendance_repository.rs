//! Attendance repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Attendance, Page, PageRequest};

/// Filter criteria for listing attendances.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub user_id: Option<i64>,
    /// Day of `from_datetime` (UTC).
    pub day: Option<NaiveDate>,
}

/// Repository interface for Attendance persistence.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, attendance: &Attendance) -> DomainResult<Attendance>;

    async fn get(&self, id: i64) -> DomainResult<Option<Attendance>>;

    async fn update(&self, attendance: &Attendance) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List attendances, most recent first.
    async fn list(&self, filter: AttendanceFilter, page: PageRequest) -> DomainResult<Page<Attendance>>;
}
