//! User lookup and caller resolution.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Page, PageRequest, User};
use crate::domain::ports::{UserFilter, UserRepository};

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolve the username forwarded by the authenticating proxy.
    ///
    /// Unknown and inactive users resolve to `None`.
    pub async fn resolve_caller(&self, username: &str) -> DomainResult<Option<User>> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(None);
        }
        let user = self.repository.get_by_username(username).await?;
        Ok(user.filter(|u| u.is_active))
    }

    pub async fn list(&self, filter: UserFilter, page: PageRequest) -> DomainResult<Page<User>> {
        self.repository.list(filter, page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<User> {
        self.repository.get(id).await?.ok_or(DomainError::not_found("User", id))
    }

    /// Provision a user. Only reachable from the command line.
    pub async fn create(&self, user: User) -> DomainResult<User> {
        user.validate().map_err(DomainError::ValidationFailed)?;
        let created = self.repository.create(&user).await?;
        tracing::info!(user_id = created.id, username = %created.username, "provisioned user");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteUserRepository};

    async fn setup_service() -> UserService<SqliteUserRepository> {
        let pool = create_migrated_test_pool().await.unwrap();
        UserService::new(Arc::new(SqliteUserRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_resolve_caller() {
        let service = setup_service().await;
        service.create(User::new("alice")).await.unwrap();
        let mut inactive = User::new("carol");
        inactive.is_active = false;
        service.create(inactive).await.unwrap();

        assert_eq!(service.resolve_caller("alice").await.unwrap().unwrap().username, "alice");
        assert!(service.resolve_caller("carol").await.unwrap().is_none());
        assert!(service.resolve_caller("mallory").await.unwrap().is_none());
        assert!(service.resolve_caller("  ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = setup_service().await;
        assert!(matches!(service.get(5).await, Err(DomainError::NotFound { entity: "User", id: 5 })));
    }
}
