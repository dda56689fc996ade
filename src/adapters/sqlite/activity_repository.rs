//! SQLite implementations of the activity and activity block repositories.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Activity, ActivityBlock, Page, PageRequest};
use crate::domain::ports::{ActivityBlockFilter, ActivityBlockRepository, ActivityFilter, ActivityRepository};

use super::{format_datetime, parse_datetime, parse_optional_datetime, ListQuery};

const ACTIVITY_COLUMNS: &str = "id, user_id, task_id, comment, start_datetime";
const BLOCK_COLUMNS: &str = "b.id, b.activity_id, b.from_datetime, b.to_datetime";
const BLOCK_FROM: &str = "activity_blocks b JOIN activities a ON a.id = b.activity_id";

#[derive(Clone)]
pub struct SqliteActivityRepository {
    pool: SqlitePool,
}

impl SqliteActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn create(&self, activity: &Activity) -> DomainResult<Activity> {
        let result = sqlx::query(
            "INSERT INTO activities (user_id, task_id, comment, start_datetime) VALUES (?, ?, ?, ?)",
        )
        .bind(activity.user_id)
        .bind(activity.task_id)
        .bind(&activity.comment)
        .bind(format_datetime(&activity.start_datetime))
        .execute(&self.pool)
        .await?;

        Ok(Activity {
            id: result.last_insert_rowid(),
            ..activity.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Activity>> {
        let row: Option<ActivityRow> =
            sqlx::query_as(&format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, activity: &Activity) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE activities SET user_id = ?, task_id = ?, comment = ?, start_datetime = ? WHERE id = ?",
        )
        .bind(activity.user_id)
        .bind(activity.task_id)
        .bind(&activity.comment)
        .bind(format_datetime(&activity.start_datetime))
        .bind(activity.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Activity", activity.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Activity", id));
        }

        Ok(())
    }

    async fn list(&self, filter: ActivityFilter, page: PageRequest) -> DomainResult<Page<Activity>> {
        let mut query = ListQuery::new();
        if let Some(user_id) = filter.user_id {
            query.and("user_id = ?", user_id);
        }
        if let Some(task_id) = filter.task_id {
            query.and("task_id = ?", task_id);
        }
        if let Some(day) = filter.day {
            query.and("date(start_datetime) = ?", day.format("%Y-%m-%d").to_string());
        }
        if filter.active {
            query.and_raw(
                "EXISTS (SELECT 1 FROM activity_blocks b WHERE b.activity_id = activities.id AND b.to_datetime IS NULL)",
            );
        }

        let (count, rows) = query
            .fetch_page::<ActivityRow>(&self.pool, ACTIVITY_COLUMNS, "activities", "start_datetime DESC, id DESC", page)
            .await?;
        let results = rows.into_iter().map(TryInto::try_into).collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(page, count, results))
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    user_id: i64,
    task_id: Option<i64>,
    comment: String,
    start_datetime: String,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: row.id,
            user_id: row.user_id,
            task_id: row.task_id,
            comment: row.comment,
            start_datetime: parse_datetime(&row.start_datetime)?,
        })
    }
}

#[derive(Clone)]
pub struct SqliteActivityBlockRepository {
    pool: SqlitePool,
}

impl SqliteActivityBlockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityBlockRepository for SqliteActivityBlockRepository {
    async fn create(&self, block: &ActivityBlock) -> DomainResult<ActivityBlock> {
        let result = sqlx::query(
            "INSERT INTO activity_blocks (activity_id, from_datetime, to_datetime) VALUES (?, ?, ?)",
        )
        .bind(block.activity_id)
        .bind(format_datetime(&block.from_datetime))
        .bind(block.to_datetime.as_ref().map(format_datetime))
        .execute(&self.pool)
        .await?;

        Ok(ActivityBlock {
            id: result.last_insert_rowid(),
            ..block.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<ActivityBlock>> {
        let row: Option<BlockRow> = sqlx::query_as(&format!("SELECT {BLOCK_COLUMNS} FROM {BLOCK_FROM} WHERE b.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, block: &ActivityBlock) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE activity_blocks SET activity_id = ?, from_datetime = ?, to_datetime = ? WHERE id = ?",
        )
        .bind(block.activity_id)
        .bind(format_datetime(&block.from_datetime))
        .bind(block.to_datetime.as_ref().map(format_datetime))
        .bind(block.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("ActivityBlock", block.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM activity_blocks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("ActivityBlock", id));
        }

        Ok(())
    }

    async fn list(&self, filter: ActivityBlockFilter, page: PageRequest) -> DomainResult<Page<ActivityBlock>> {
        let mut query = ListQuery::new();
        if let Some(user_id) = filter.user_id {
            query.and("a.user_id = ?", user_id);
        }
        if let Some(activity_id) = filter.activity_id {
            query.and("b.activity_id = ?", activity_id);
        }

        let (count, rows) = query
            .fetch_page::<BlockRow>(&self.pool, BLOCK_COLUMNS, BLOCK_FROM, "b.from_datetime, b.id", page)
            .await?;
        let results = rows.into_iter().map(TryInto::try_into).collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(page, count, results))
    }
}

#[derive(sqlx::FromRow)]
struct BlockRow {
    id: i64,
    activity_id: i64,
    from_datetime: String,
    to_datetime: Option<String>,
}

impl TryFrom<BlockRow> for ActivityBlock {
    type Error = DomainError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        Ok(ActivityBlock {
            id: row.id,
            activity_id: row.activity_id,
            from_datetime: parse_datetime(&row.from_datetime)?,
            to_datetime: parse_optional_datetime(row.to_datetime)?,
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

    struct Fixture {
        activities: SqliteActivityRepository,
        blocks: SqliteActivityBlockRepository,
        alice: i64,
        bob: i64,
    }

    async fn setup() -> Fixture {
        let pool = create_migrated_test_pool().await.unwrap();
        let users = SqliteUserRepository::new(pool.clone());
        let alice = users.create(&User::new("alice")).await.unwrap().id;
        let bob = users.create(&User::new("bob")).await.unwrap().id;
        Fixture {
            activities: SqliteActivityRepository::new(pool.clone()),
            blocks: SqliteActivityBlockRepository::new(pool),
            alice,
            bob,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_activity() {
        let f = setup().await;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let created = f
            .activities
            .create(&Activity::new(f.alice, start).with_comment("Standup"))
            .await
            .unwrap();

        let stored = f.activities.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.start_datetime, start);
    }

    #[tokio::test]
    async fn test_list_filters_by_day_and_orders_descending() {
        let f = setup().await;
        let day = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        f.activities.create(&Activity::new(f.alice, day)).await.unwrap();
        f.activities.create(&Activity::new(f.alice, day + Duration::hours(4))).await.unwrap();
        f.activities.create(&Activity::new(f.alice, day + Duration::days(1))).await.unwrap();

        let filter = ActivityFilter {
            user_id: Some(f.alice),
            day: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        let page = f.activities.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 2);
        assert!(page.results[0].start_datetime > page.results[1].start_datetime);
    }

    #[tokio::test]
    async fn test_active_filter_requires_open_block() {
        let f = setup().await;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let running = f.activities.create(&Activity::new(f.alice, start)).await.unwrap();
        let finished = f.activities.create(&Activity::new(f.alice, start)).await.unwrap();

        f.blocks.create(&ActivityBlock::start(running.id, start)).await.unwrap();
        let mut closed = ActivityBlock::start(finished.id, start);
        closed.to_datetime = Some(start + Duration::hours(1));
        f.blocks.create(&closed).await.unwrap();

        let filter = ActivityFilter {
            user_id: Some(f.alice),
            active: true,
            ..Default::default()
        };
        let page = f.activities.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].id, running.id);
    }

    #[tokio::test]
    async fn test_block_list_scoped_to_activity_owner() {
        let f = setup().await;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mine = f.activities.create(&Activity::new(f.alice, start)).await.unwrap();
        let theirs = f.activities.create(&Activity::new(f.bob, start)).await.unwrap();
        f.blocks.create(&ActivityBlock::start(mine.id, start)).await.unwrap();
        f.blocks.create(&ActivityBlock::start(theirs.id, start)).await.unwrap();

        let filter = ActivityBlockFilter {
            user_id: Some(f.alice),
            ..Default::default()
        };
        let page = f.blocks.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].activity_id, mine.id);
    }

    #[tokio::test]
    async fn test_deleting_activity_removes_blocks() {
        let f = setup().await;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let activity = f.activities.create(&Activity::new(f.alice, start)).await.unwrap();
        let block = f.blocks.create(&ActivityBlock::start(activity.id, start)).await.unwrap();

        f.activities.delete(activity.id).await.unwrap();
        assert!(f.blocks.get(block.id).await.unwrap().is_none());
    }
}
