//! User repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Page, PageRequest, User};

/// Filter criteria for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub username: Option<String>,
}

/// Repository interface for User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> DomainResult<User>;

    async fn get(&self, id: i64) -> DomainResult<Option<User>>;

    /// Look up a user by exact username.
    async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    async fn list(&self, filter: UserFilter, page: PageRequest) -> DomainResult<Page<User>>;
}
