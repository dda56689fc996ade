//! SQLite database adapters for the Timed API.

pub mod activity_repository;
pub mod attendance_repository;
pub mod connection;
pub mod customer_repository;
pub mod migrations;
pub mod project_repository;
pub mod report_repository;
pub mod task_repository;
pub mod user_repository;

pub use activity_repository::{SqliteActivityBlockRepository, SqliteActivityRepository};
pub use attendance_repository::SqliteAttendanceRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use customer_repository::SqliteCustomerRepository;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use project_repository::SqliteProjectRepository;
pub use report_repository::SqliteReportRepository;
pub use task_repository::{SqliteTaskRepository, SqliteTaskTemplateRepository};
pub use user_repository::SqliteUserRepository;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DatabaseConfig, PageRequest};

/// Format a timestamp for storage. Fixed width, so text order is time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an optional RFC3339 datetime string from a SQLite row field.
pub fn parse_optional_datetime(s: Option<String>) -> DomainResult<Option<DateTime<Utc>>> {
    s.map(|s| parse_datetime(&s)).transpose()
}

/// Parse a `YYYY-MM-DD` date from a SQLite row field.
pub fn parse_date(s: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| DomainError::SerializationError(e.to_string()))
}

/// Build a case-insensitive `LIKE` pattern matching `term` anywhere.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// A value bound to a dynamically built query.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Int(i64),
    Text(String),
}

impl From<i64> for Binding {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for Binding {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// WHERE clause accumulator shared by the paginated list queries.
#[derive(Debug, Default)]
pub struct ListQuery {
    clauses: String,
    bindings: Vec<Binding>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `AND <clause>` with one bound parameter.
    pub fn and(&mut self, clause: &str, binding: impl Into<Binding>) -> &mut Self {
        self.clauses.push_str(" AND ");
        self.clauses.push_str(clause);
        self.bindings.push(binding.into());
        self
    }

    /// Append `AND <clause>` whose placeholders take `bindings` in order.
    pub fn and_all<B: Into<Binding>>(&mut self, clause: &str, bindings: impl IntoIterator<Item = B>) -> &mut Self {
        self.clauses.push_str(" AND ");
        self.clauses.push_str(clause);
        self.bindings.extend(bindings.into_iter().map(Into::into));
        self
    }

    /// Append `AND <clause>` without parameters.
    pub fn and_raw(&mut self, clause: &str) -> &mut Self {
        self.clauses.push_str(" AND ");
        self.clauses.push_str(clause);
        self
    }

    /// Run the count and the page query.
    ///
    /// `select` is the column list, `from` the table expression; both are
    /// shared by the count so joins filter identically.
    pub async fn fetch_page<R>(
        &self,
        pool: &SqlitePool,
        select: &str,
        from: &str,
        order_by: &str,
        page: PageRequest,
    ) -> DomainResult<(u64, Vec<R>)>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let count_sql = format!("SELECT COUNT(*) FROM {from} WHERE 1=1{}", self.clauses);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for binding in &self.bindings {
            count_query = match binding {
                Binding::Int(v) => count_query.bind(*v),
                Binding::Text(v) => count_query.bind(v.as_str()),
            };
        }
        let count = count_query.fetch_one(pool).await?;

        let sql = format!(
            "SELECT {select} FROM {from} WHERE 1=1{} ORDER BY {order_by} LIMIT ? OFFSET ?",
            self.clauses
        );
        let mut q = sqlx::query_as::<_, R>(&sql);
        for binding in &self.bindings {
            q = match binding {
                Binding::Int(v) => q.bind(*v),
                Binding::Text(v) => q.bind(v.as_str()),
            };
        }
        let rows = q.bind(page.limit()).bind(page.offset()).fetch_all(pool).await?;

        Ok((u64::try_from(count).unwrap_or_default(), rows))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Open the configured database and apply pending migrations.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(&database_url(&config.path), Some(PoolConfig::from(config))).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// Build a `sqlite:` URL for a database file path.
pub fn database_url(path: &str) -> String {
    if path.starts_with("sqlite:") {
        path.to_string()
    } else {
        format!("sqlite:{path}")
    }
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}
