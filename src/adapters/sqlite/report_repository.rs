//! SQLite implementation of the ReportRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Page, PageRequest, Report};
use crate::domain::ports::{ReportFilter, ReportRepository};

use super::{parse_date, ListQuery};

const REPORT_COLUMNS: &str = "id, user_id, task_id, date, duration, comment, review, not_billable";

#[derive(Clone)]
pub struct SqliteReportRepository {
    pool: SqlitePool,
}

impl SqliteReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn create(&self, report: &Report) -> DomainResult<Report> {
        let result = sqlx::query(
            r#"INSERT INTO reports (user_id, task_id, date, duration, comment, review, not_billable)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(report.user_id)
        .bind(report.task_id)
        .bind(report.date.format("%Y-%m-%d").to_string())
        .bind(report.duration)
        .bind(&report.comment)
        .bind(report.review)
        .bind(report.not_billable)
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id: result.last_insert_rowid(),
            ..report.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Report>> {
        let row: Option<ReportRow> = sqlx::query_as(&format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, report: &Report) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE reports SET user_id = ?, task_id = ?, date = ?, duration = ?, comment = ?,
               review = ?, not_billable = ?
               WHERE id = ?"#,
        )
        .bind(report.user_id)
        .bind(report.task_id)
        .bind(report.date.format("%Y-%m-%d").to_string())
        .bind(report.duration)
        .bind(&report.comment)
        .bind(report.review)
        .bind(report.not_billable)
        .bind(report.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Report", report.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Report", id));
        }

        Ok(())
    }

    async fn list(&self, filter: ReportFilter, page: PageRequest) -> DomainResult<Page<Report>> {
        let mut query = ListQuery::new();
        if let Some(user_id) = filter.user_id {
            query.and("user_id = ?", user_id);
        }
        if let Some(task_id) = filter.task_id {
            query.and("task_id = ?", task_id);
        }

        let (count, rows) = query
            .fetch_page::<ReportRow>(&self.pool, REPORT_COLUMNS, "reports", "date DESC, id DESC", page)
            .await?;
        let results = rows.into_iter().map(TryInto::try_into).collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(page, count, results))
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: i64,
    user_id: i64,
    task_id: Option<i64>,
    date: String,
    duration: i64,
    comment: String,
    review: bool,
    not_billable: bool,
}

impl TryFrom<ReportRow> for Report {
    type Error = DomainError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Report {
            id: row.id,
            user_id: row.user_id,
            task_id: row.task_id,
            date: parse_date(&row.date)?,
            duration: row.duration,
            comment: row.comment,
            review: row.review,
            not_billable: row.not_billable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteUserRepository};
    use crate::domain::models::User;
    use crate::domain::ports::UserRepository;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_report_crud_and_ordering() {
        let pool = create_migrated_test_pool().await.unwrap();
        let alice = SqliteUserRepository::new(pool.clone())
            .create(&User::new("alice"))
            .await
            .unwrap()
            .id;
        let repo = SqliteReportRepository::new(pool);

        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let mut report = repo.create(&Report::new(alice, first, 3600)).await.unwrap();
        repo.create(&Report::new(alice, second, 1800)).await.unwrap();

        report.not_billable = true;
        report.comment = "Internal".to_string();
        repo.update(&report).await.unwrap();
        let stored = repo.get(report.id).await.unwrap().unwrap();
        assert!(stored.not_billable);
        assert_eq!(stored.date, first);

        let page = repo
            .list(ReportFilter { user_id: Some(alice), task_id: None }, PageRequest::default())
            .await
            .unwrap();
        let dates: Vec<_> = page.results.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![second, first]);

        repo.delete(report.id).await.unwrap();
        assert!(repo.get(report.id).await.unwrap().is_none());
    }
}
