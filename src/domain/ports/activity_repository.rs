//! Activity and activity block repository ports.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Activity, ActivityBlock, Page, PageRequest};

/// Filter criteria for listing activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    /// Owner of the activities.
    pub user_id: Option<i64>,
    pub task_id: Option<i64>,
    /// Day of `start_datetime` (UTC).
    pub day: Option<NaiveDate>,
    /// Only activities with at least one running block.
    pub active: bool,
}

/// Repository interface for Activity persistence.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &Activity) -> DomainResult<Activity>;

    async fn get(&self, id: i64) -> DomainResult<Option<Activity>>;

    async fn update(&self, activity: &Activity) -> DomainResult<()>;

    /// Delete an activity and its blocks.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List activities, most recent start first.
    async fn list(&self, filter: ActivityFilter, page: PageRequest) -> DomainResult<Page<Activity>>;
}

/// Filter criteria for listing activity blocks.
#[derive(Debug, Clone, Default)]
pub struct ActivityBlockFilter {
    /// Owner of the block's activity.
    pub user_id: Option<i64>,
    pub activity_id: Option<i64>,
}

/// Repository interface for ActivityBlock persistence.
#[async_trait]
pub trait ActivityBlockRepository: Send + Sync {
    async fn create(&self, block: &ActivityBlock) -> DomainResult<ActivityBlock>;

    async fn get(&self, id: i64) -> DomainResult<Option<ActivityBlock>>;

    async fn update(&self, block: &ActivityBlock) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List blocks in start order.
    async fn list(
        &self,
        filter: ActivityBlockFilter,
        page: PageRequest,
    ) -> DomainResult<Page<ActivityBlock>>;
}
