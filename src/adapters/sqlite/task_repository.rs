//! SQLite implementations of the task and task template repositories.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Page, PageRequest, Task, TaskTemplate};
use crate::domain::ports::{TaskFilter, TaskRepository, TaskTemplateRepository};

use super::ListQuery;

const TASK_COLUMNS: &str = "id, name, project_id, estimated_hours, archived";

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> DomainResult<Task> {
        let result = sqlx::query(
            "INSERT INTO tasks (name, project_id, estimated_hours, archived) VALUES (?, ?, ?, ?)",
        )
        .bind(&task.name)
        .bind(task.project_id)
        .bind(task.estimated_hours)
        .bind(task.archived)
        .execute(&self.pool)
        .await?;

        Ok(Task {
            id: result.last_insert_rowid(),
            ..task.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, task: &Task) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE tasks SET name = ?, project_id = ?, estimated_hours = ?, archived = ? WHERE id = ?",
        )
        .bind(&task.name)
        .bind(task.project_id)
        .bind(task.estimated_hours)
        .bind(task.archived)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Task", task.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Task", id));
        }

        Ok(())
    }

    async fn list(&self, filter: TaskFilter, page: PageRequest) -> DomainResult<Page<Task>> {
        let mut query = ListQuery::new();
        if let Some(project_id) = filter.project_id {
            query.and("project_id = ?", project_id);
        }

        let (count, rows) = query
            .fetch_page::<TaskRow>(&self.pool, TASK_COLUMNS, "tasks", "id", page)
            .await?;
        Ok(Page::new(page, count, rows.into_iter().map(Into::into).collect()))
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    project_id: i64,
    estimated_hours: Option<f64>,
    archived: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            name: row.name,
            project_id: row.project_id,
            estimated_hours: row.estimated_hours,
            archived: row.archived,
        }
    }
}

#[derive(Clone)]
pub struct SqliteTaskTemplateRepository {
    pool: SqlitePool,
}

impl SqliteTaskTemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskTemplateRepository for SqliteTaskTemplateRepository {
    async fn create(&self, template: &TaskTemplate) -> DomainResult<TaskTemplate> {
        let result = sqlx::query("INSERT INTO task_templates (name) VALUES (?)")
            .bind(&template.name)
            .execute(&self.pool)
            .await?;

        Ok(TaskTemplate {
            id: result.last_insert_rowid(),
            name: template.name.clone(),
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<TaskTemplate>> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM task_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, name)| TaskTemplate { id, name }))
    }

    async fn update(&self, template: &TaskTemplate) -> DomainResult<()> {
        let result = sqlx::query("UPDATE task_templates SET name = ? WHERE id = ?")
            .bind(&template.name)
            .bind(template.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("TaskTemplate", template.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM task_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("TaskTemplate", id));
        }

        Ok(())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Page<TaskTemplate>> {
        let (count, rows) = ListQuery::new()
            .fetch_page::<(i64, String)>(&self.pool, "id, name", "task_templates", "id", page)
            .await?;
        Ok(Page::new(
            page,
            count,
            rows.into_iter().map(|(id, name)| TaskTemplate { id, name }).collect(),
        ))
    }
}
