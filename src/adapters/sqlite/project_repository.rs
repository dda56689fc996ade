//! SQLite implementation of the ProjectRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Page, PageRequest, Project, TrackerType};
use crate::domain::ports::{ProjectFilter, ProjectRepository};

use super::{like_pattern, ListQuery};

const PROJECT_COLUMNS: &str = "p.id, p.name, p.customer_id, p.comment, p.archived, p.tracker_type, p.tracker_name, p.tracker_api_key";
const PROJECT_FROM: &str = "projects p JOIN customers c ON c.id = p.customer_id";

#[derive(Clone)]
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> DomainResult<Project> {
        let result = sqlx::query(
            r#"INSERT INTO projects (name, customer_id, comment, archived, tracker_type, tracker_name, tracker_api_key)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&project.name)
        .bind(project.customer_id)
        .bind(&project.comment)
        .bind(project.archived)
        .bind(project.tracker_type.map(|t| t.code()))
        .bind(&project.tracker_name)
        .bind(&project.tracker_api_key)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id: result.last_insert_rowid(),
            ..project.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Project>> {
        let row: Option<ProjectRow> =
            sqlx::query_as(&format!("SELECT {PROJECT_COLUMNS} FROM {PROJECT_FROM} WHERE p.id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, project: &Project) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE projects SET name = ?, customer_id = ?, comment = ?, archived = ?,
               tracker_type = ?, tracker_name = ?, tracker_api_key = ?
               WHERE id = ?"#,
        )
        .bind(&project.name)
        .bind(project.customer_id)
        .bind(&project.comment)
        .bind(project.archived)
        .bind(project.tracker_type.map(|t| t.code()))
        .bind(&project.tracker_name)
        .bind(&project.tracker_api_key)
        .bind(project.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Project", project.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Project", id));
        }

        Ok(())
    }

    async fn list(&self, filter: ProjectFilter, page: PageRequest) -> DomainResult<Page<Project>> {
        let mut query = ListQuery::new();
        if !filter.include_archived {
            query.and_raw("p.archived = 0");
        }
        if let Some(customer_id) = filter.customer_id {
            query.and("p.customer_id = ?", customer_id);
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search.trim());
            query.and_all(
                "(LOWER(p.name) LIKE ? ESCAPE '\\' OR LOWER(c.name) LIKE ? ESCAPE '\\')",
                [pattern.clone(), pattern],
            );
        }

        let (count, rows) = query
            .fetch_page::<ProjectRow>(&self.pool, PROJECT_COLUMNS, PROJECT_FROM, "c.name, p.name, p.id", page)
            .await?;
        Ok(Page::new(page, count, rows.into_iter().map(Into::into).collect()))
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    customer_id: i64,
    comment: String,
    archived: bool,
    tracker_type: Option<String>,
    tracker_name: Option<String>,
    tracker_api_key: Option<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            customer_id: row.customer_id,
            comment: row.comment,
            archived: row.archived,
            // Unknown codes behave as "no tracker".
            tracker_type: row.tracker_type.as_deref().and_then(TrackerType::from_code),
            tracker_name: row.tracker_name,
            tracker_api_key: row.tracker_api_key,
        }
    }
}
