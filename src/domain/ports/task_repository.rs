//! Task and task template repository ports.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Page, PageRequest, Task, TaskTemplate};

/// Filters for querying tasks
#[derive(Default, Debug, Clone)]
pub struct TaskFilter {
    pub project_id: Option<i64>,
}

/// Repository port for task persistence operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> DomainResult<Task>;

    async fn get(&self, id: i64) -> DomainResult<Option<Task>>;

    async fn update(&self, task: &Task) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list(&self, filter: TaskFilter, page: PageRequest) -> DomainResult<Page<Task>>;
}

/// Repository port for task templates
#[async_trait]
pub trait TaskTemplateRepository: Send + Sync {
    async fn create(&self, template: &TaskTemplate) -> DomainResult<TaskTemplate>;

    async fn get(&self, id: i64) -> DomainResult<Option<TaskTemplate>>;

    async fn update(&self, template: &TaskTemplate) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list(&self, page: PageRequest) -> DomainResult<Page<TaskTemplate>>;
}
