//! SQLite implementation of the AttendanceRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Attendance, Page, PageRequest};
use crate::domain::ports::{AttendanceFilter, AttendanceRepository};

use super::{format_datetime, parse_datetime, ListQuery};

const ATTENDANCE_COLUMNS: &str = "id, user_id, from_datetime, to_datetime";

#[derive(Clone)]
pub struct SqliteAttendanceRepository {
    pool: SqlitePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepository {
    async fn create(&self, attendance: &Attendance) -> DomainResult<Attendance> {
        let result = sqlx::query("INSERT INTO attendances (user_id, from_datetime, to_datetime) VALUES (?, ?, ?)")
            .bind(attendance.user_id)
            .bind(format_datetime(&attendance.from_datetime))
            .bind(format_datetime(&attendance.to_datetime))
            .execute(&self.pool)
            .await?;

        Ok(Attendance {
            id: result.last_insert_rowid(),
            ..attendance.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Attendance>> {
        let row: Option<AttendanceRow> =
            sqlx::query_as(&format!("SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, attendance: &Attendance) -> DomainResult<()> {
        let result = sqlx::query("UPDATE attendances SET user_id = ?, from_datetime = ?, to_datetime = ? WHERE id = ?")
            .bind(attendance.user_id)
            .bind(format_datetime(&attendance.from_datetime))
            .bind(format_datetime(&attendance.to_datetime))
            .bind(attendance.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Attendance", attendance.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Attendance", id));
        }

        Ok(())
    }

    async fn list(&self, filter: AttendanceFilter, page: PageRequest) -> DomainResult<Page<Attendance>> {
        let mut query = ListQuery::new();
        if let Some(user_id) = filter.user_id {
            query.and("user_id = ?", user_id);
        }
        if let Some(day) = filter.day {
            query.and("date(from_datetime) = ?", day.format("%Y-%m-%d").to_string());
        }

        let (count, rows) = query
            .fetch_page::<AttendanceRow>(&self.pool, ATTENDANCE_COLUMNS, "attendances", "from_datetime DESC, id DESC", page)
            .await?;
        let results = rows.into_iter().map(TryInto::try_into).collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(page, count, results))
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: i64,
    user_id: i64,
    from_datetime: String,
    to_datetime: String,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = DomainError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(Attendance {
            id: row.id,
            user_id: row.user_id,
            from_datetime: parse_datetime(&row.from_datetime)?,
            to_datetime: parse_datetime(&row.to_datetime)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteUserRepository};
    use crate::domain::models::User;
    use crate::domain::ports::UserRepository;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[tokio::test]
    async fn test_list_by_user_and_day() {
        let pool = create_migrated_test_pool().await.unwrap();
        let users = SqliteUserRepository::new(pool.clone());
        let alice = users.create(&User::new("alice")).await.unwrap().id;
        let bob = users.create(&User::new("bob")).await.unwrap().id;
        let repo = SqliteAttendanceRepository::new(pool);

        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        repo.create(&Attendance::new(alice, morning, morning + Duration::hours(4))).await.unwrap();
        repo.create(&Attendance::new(alice, morning + Duration::days(1), morning + Duration::days(1) + Duration::hours(8)))
            .await
            .unwrap();
        repo.create(&Attendance::new(bob, morning, morning + Duration::hours(8))).await.unwrap();

        let filter = AttendanceFilter {
            user_id: Some(alice),
            day: None,
        };
        let page = repo.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 2);
        // Most recent first.
        assert_eq!(page.results[0].from_datetime, morning + Duration::days(1));

        let filter = AttendanceFilter {
            user_id: Some(alice),
            day: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        let page = repo.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].to_datetime, morning + Duration::hours(4));
    }
}
