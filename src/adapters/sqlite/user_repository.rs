//! SQLite implementation of the UserRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Page, PageRequest, User};
use crate::domain::ports::{UserFilter, UserRepository};

use super::ListQuery;

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, is_active";

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> DomainResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, first_name, last_name, email, is_active) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            ..user.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: UserFilter, page: PageRequest) -> DomainResult<Page<User>> {
        let mut query = ListQuery::new();
        if let Some(username) = filter.username {
            query.and("username = ?", username);
        }

        let (count, rows) = query
            .fetch_page::<UserRow>(&self.pool, USER_COLUMNS, "users", "id", page)
            .await?;
        Ok(Page::new(page, count, rows.into_iter().map(Into::into).collect()))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_active: row.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::domain::errors::DomainError;

    async fn setup_test_repo() -> SqliteUserRepository {
        SqliteUserRepository::new(create_migrated_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let repo = setup_test_repo().await;
        let mut user = User::new("jdoe");
        user.first_name = "Jane".to_string();

        let created = repo.create(&user).await.unwrap();
        assert!(created.id > 0);

        let by_id = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_name = repo.get_by_username("jdoe").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = setup_test_repo().await;
        repo.create(&User::new("jdoe")).await.unwrap();

        let err = repo.create(&User::new("jdoe")).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_username() {
        let repo = setup_test_repo().await;
        repo.create(&User::new("alice")).await.unwrap();
        repo.create(&User::new("bob")).await.unwrap();

        let all = repo.list(UserFilter::default(), PageRequest::default()).await.unwrap();
        assert_eq!(all.count, 2);

        let filtered = repo
            .list(UserFilter { username: Some("bob".to_string()) }, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(filtered.count, 1);
        assert_eq!(filtered.results[0].username, "bob");
    }
}
