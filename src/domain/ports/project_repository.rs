//! Project and customer repository ports.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Customer, Page, PageRequest, Project};

/// Filter criteria for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub customer_id: Option<i64>,
    /// Case-insensitive match on the project or customer name.
    pub search: Option<String>,
    pub include_archived: bool,
}

/// Repository interface for Project persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a project and return it with its assigned id.
    async fn create(&self, project: &Project) -> DomainResult<Project>;

    /// Get a project by ID, archived or not.
    async fn get(&self, id: i64) -> DomainResult<Option<Project>>;

    async fn update(&self, project: &Project) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List projects ordered by customer name, then project name.
    async fn list(&self, filter: ProjectFilter, page: PageRequest) -> DomainResult<Page<Project>>;
}

/// Filter criteria for listing customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive match on the customer name.
    pub search: Option<String>,
    pub include_archived: bool,
}

/// Repository interface for Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> DomainResult<Customer>;

    async fn get(&self, id: i64) -> DomainResult<Option<Customer>>;

    async fn update(&self, customer: &Customer) -> DomainResult<()>;

    /// Delete a customer together with its projects and their tasks.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List customers ordered by name.
    async fn list(&self, filter: CustomerFilter, page: PageRequest) -> DomainResult<Page<Customer>>;
}
