//! Services for the caller-owned timesheet resources.
//!
//! Activities, activity blocks, attendances and reports belong to a user.
//! Every operation takes the authenticated caller and only ever sees the
//! caller's records; someone else's record is reported as not found.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Activity, ActivityBlock, Attendance, Page, PageRequest, Report, User};
use crate::domain::ports::{
    ActivityBlockFilter, ActivityBlockRepository, ActivityFilter, ActivityRepository, AttendanceFilter,
    AttendanceRepository, ReportFilter, ReportRepository,
};

pub struct ActivityService<A: ActivityRepository, B: ActivityBlockRepository> {
    activities: Arc<A>,
    blocks: Arc<B>,
}

impl<A: ActivityRepository, B: ActivityBlockRepository> ActivityService<A, B> {
    pub fn new(activities: Arc<A>, blocks: Arc<B>) -> Self {
        Self { activities, blocks }
    }

    pub async fn list_activities(
        &self,
        caller: &User,
        filter: ActivityFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Activity>> {
        let filter = ActivityFilter {
            user_id: Some(caller.id),
            ..filter
        };
        self.activities.list(filter, page).await
    }

    pub async fn get_activity(&self, caller: &User, id: i64) -> DomainResult<Activity> {
        self.activities
            .get(id)
            .await?
            .filter(|a| a.user_id == caller.id)
            .ok_or(DomainError::not_found("Activity", id))
    }

    /// Create an activity owned by the caller.
    pub async fn create_activity(&self, caller: &User, activity: Activity) -> DomainResult<Activity> {
        let activity = Activity {
            user_id: caller.id,
            ..activity
        };
        let created = self.activities.create(&activity).await?;
        tracing::debug!(activity_id = created.id, user_id = caller.id, "created activity");
        Ok(created)
    }

    pub async fn update_activity(&self, caller: &User, activity: Activity) -> DomainResult<Activity> {
        self.get_activity(caller, activity.id).await?;
        let activity = Activity {
            user_id: caller.id,
            ..activity
        };
        self.activities.update(&activity).await?;
        Ok(activity)
    }

    pub async fn delete_activity(&self, caller: &User, id: i64) -> DomainResult<()> {
        self.get_activity(caller, id).await?;
        self.activities.delete(id).await
    }

    pub async fn list_blocks(
        &self,
        caller: &User,
        filter: ActivityBlockFilter,
        page: PageRequest,
    ) -> DomainResult<Page<ActivityBlock>> {
        let filter = ActivityBlockFilter {
            user_id: Some(caller.id),
            ..filter
        };
        self.blocks.list(filter, page).await
    }

    pub async fn get_block(&self, caller: &User, id: i64) -> DomainResult<ActivityBlock> {
        let block = self
            .blocks
            .get(id)
            .await?
            .ok_or(DomainError::not_found("ActivityBlock", id))?;

        // Hide blocks of other users' activities.
        self.get_activity(caller, block.activity_id)
            .await
            .map_err(|_| DomainError::not_found("ActivityBlock", id))?;
        Ok(block)
    }

    /// Add a block to one of the caller's activities.
    pub async fn create_block(&self, caller: &User, block: ActivityBlock) -> DomainResult<ActivityBlock> {
        block.validate().map_err(DomainError::ValidationFailed)?;
        self.get_activity(caller, block.activity_id).await?;
        self.blocks.create(&block).await
    }

    pub async fn update_block(&self, caller: &User, block: ActivityBlock) -> DomainResult<ActivityBlock> {
        self.get_block(caller, block.id).await?;
        block.validate().map_err(DomainError::ValidationFailed)?;
        self.get_activity(caller, block.activity_id).await?;
        self.blocks.update(&block).await?;
        Ok(block)
    }

    pub async fn delete_block(&self, caller: &User, id: i64) -> DomainResult<()> {
        self.get_block(caller, id).await?;
        self.blocks.delete(id).await
    }
}

pub struct AttendanceService<R: AttendanceRepository> {
    repository: Arc<R>,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, caller: &User, filter: AttendanceFilter, page: PageRequest) -> DomainResult<Page<Attendance>> {
        let filter = AttendanceFilter {
            user_id: Some(caller.id),
            ..filter
        };
        self.repository.list(filter, page).await
    }

    pub async fn get(&self, caller: &User, id: i64) -> DomainResult<Attendance> {
        self.repository
            .get(id)
            .await?
            .filter(|a| a.user_id == caller.id)
            .ok_or(DomainError::not_found("Attendance", id))
    }

    pub async fn create(&self, caller: &User, attendance: Attendance) -> DomainResult<Attendance> {
        let attendance = Attendance {
            user_id: caller.id,
            ..attendance
        };
        attendance.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.create(&attendance).await
    }

    pub async fn update(&self, caller: &User, attendance: Attendance) -> DomainResult<Attendance> {
        self.get(caller, attendance.id).await?;
        let attendance = Attendance {
            user_id: caller.id,
            ..attendance
        };
        attendance.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.update(&attendance).await?;
        Ok(attendance)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> DomainResult<()> {
        self.get(caller, id).await?;
        self.repository.delete(id).await
    }
}

pub struct ReportService<R: ReportRepository> {
    repository: Arc<R>,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, caller: &User, filter: ReportFilter, page: PageRequest) -> DomainResult<Page<Report>> {
        let filter = ReportFilter {
            user_id: Some(caller.id),
            ..filter
        };
        self.repository.list(filter, page).await
    }

    pub async fn get(&self, caller: &User, id: i64) -> DomainResult<Report> {
        self.repository
            .get(id)
            .await?
            .filter(|r| r.user_id == caller.id)
            .ok_or(DomainError::not_found("Report", id))
    }

    pub async fn create(&self, caller: &User, report: Report) -> DomainResult<Report> {
        let report = Report {
            user_id: caller.id,
            ..report
        };
        report.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.create(&report).await
    }

    pub async fn update(&self, caller: &User, report: Report) -> DomainResult<Report> {
        self.get(caller, report.id).await?;
        let report = Report {
            user_id: caller.id,
            ..report
        };
        report.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.update(&report).await?;
        Ok(report)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> DomainResult<()> {
        self.get(caller, id).await?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{
        create_migrated_test_pool, SqliteActivityBlockRepository, SqliteActivityRepository,
        SqliteAttendanceRepository, SqliteReportRepository, SqliteUserRepository,
    };
    use crate::domain::ports::UserRepository;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    type Activities = ActivityService<SqliteActivityRepository, SqliteActivityBlockRepository>;

    struct Fixture {
        pool: sqlx::SqlitePool,
        alice: User,
        bob: User,
    }

    async fn setup() -> Fixture {
        let pool = create_migrated_test_pool().await.unwrap();
        let users = SqliteUserRepository::new(pool.clone());
        let alice = users.create(&User::new("alice")).await.unwrap();
        let bob = users.create(&User::new("bob")).await.unwrap();
        Fixture { pool, alice, bob }
    }

    fn activity_service(pool: &sqlx::SqlitePool) -> Activities {
        ActivityService::new(
            Arc::new(SqliteActivityRepository::new(pool.clone())),
            Arc::new(SqliteActivityBlockRepository::new(pool.clone())),
        )
    }

    #[tokio::test]
    async fn test_other_users_activities_are_invisible() {
        let f = setup().await;
        let service = activity_service(&f.pool);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        // The owner in the payload is ignored; the caller owns the record.
        let theirs = service
            .create_activity(&f.bob, Activity::new(f.alice.id, start))
            .await
            .unwrap();
        assert_eq!(theirs.user_id, f.bob.id);

        let mine = service.list_activities(&f.alice, ActivityFilter::default(), PageRequest::default()).await.unwrap();
        assert_eq!(mine.count, 0);

        assert!(matches!(
            service.get_activity(&f.alice, theirs.id).await,
            Err(DomainError::NotFound { entity: "Activity", .. })
        ));
        assert!(service.delete_activity(&f.alice, theirs.id).await.is_err());
        assert!(service.get_activity(&f.bob, theirs.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_active_filter() {
        let f = setup().await;
        let service = activity_service(&f.pool);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        let running = service.create_activity(&f.alice, Activity::new(0, start)).await.unwrap();
        let idle = service.create_activity(&f.alice, Activity::new(0, start)).await.unwrap();
        service.create_block(&f.alice, ActivityBlock::start(running.id, start)).await.unwrap();
        let mut done = ActivityBlock::start(idle.id, start);
        done.to_datetime = Some(start + Duration::minutes(30));
        service.create_block(&f.alice, done).await.unwrap();

        let active = ActivityFilter { active: true, ..Default::default() };
        let page = service.list_activities(&f.alice, active, PageRequest::default()).await.unwrap();
        assert_eq!(page.results.iter().map(|a| a.id).collect::<Vec<_>>(), vec![running.id]);

        let all = service.list_activities(&f.alice, ActivityFilter::default(), PageRequest::default()).await.unwrap();
        assert_eq!(all.count, 2);
    }

    #[tokio::test]
    async fn test_block_on_foreign_activity_is_not_found() {
        let f = setup().await;
        let service = activity_service(&f.pool);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let theirs = service.create_activity(&f.bob, Activity::new(0, start)).await.unwrap();
        let mine = service.create_activity(&f.alice, Activity::new(0, start)).await.unwrap();

        let err = service
            .create_block(&f.alice, ActivityBlock::start(theirs.id, start))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        // Moving an own block onto someone else's activity is refused too.
        let mut block = service.create_block(&f.alice, ActivityBlock::start(mine.id, start)).await.unwrap();
        block.activity_id = theirs.id;
        assert!(matches!(service.update_block(&f.alice, block).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_block_end_before_start_is_rejected() {
        let f = setup().await;
        let service = activity_service(&f.pool);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let activity = service.create_activity(&f.alice, Activity::new(0, start)).await.unwrap();

        let mut block = ActivityBlock::start(activity.id, start);
        block.to_datetime = Some(start - Duration::minutes(1));
        assert!(matches!(
            service.create_block(&f.alice, block).await,
            Err(DomainError::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_attendance_scoping_and_validation() {
        let f = setup().await;
        let service = AttendanceService::new(Arc::new(SqliteAttendanceRepository::new(f.pool.clone())));
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        let created = service
            .create(&f.alice, Attendance::new(0, from, from + Duration::hours(8)))
            .await
            .unwrap();
        assert_eq!(created.user_id, f.alice.id);
        assert!(service.get(&f.bob, created.id).await.is_err());

        let backwards = Attendance::new(0, from, from - Duration::hours(1));
        assert!(matches!(service.create(&f.alice, backwards).await, Err(DomainError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_report_scoping_and_validation() {
        let f = setup().await;
        let service = ReportService::new(Arc::new(SqliteReportRepository::new(f.pool.clone())));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let report = service.create(&f.alice, Report::new(0, date, 3600)).await.unwrap();
        assert!(matches!(
            service.get(&f.bob, report.id).await,
            Err(DomainError::NotFound { entity: "Report", .. })
        ));
        assert_eq!(
            service.list(&f.bob, ReportFilter::default(), PageRequest::default()).await.unwrap().count,
            0
        );

        assert!(matches!(
            service.create(&f.alice, Report::new(0, date, -1)).await,
            Err(DomainError::ValidationFailed(_))
        ));
    }
}
