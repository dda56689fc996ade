//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across the integration test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use mockito::Server;
use sqlx::SqlitePool;
use tempfile::TempDir;

use timed::adapters::http::{build_router, AppState};
use timed::adapters::sqlite::{
    initialize_database, SqliteCustomerRepository, SqliteProjectRepository, SqliteUserRepository,
};
use timed::adapters::trackers::TrackerRegistry;
use timed::domain::models::{Config, Customer, DatabaseConfig, Project, TrackerSettings, TrackerType, User};
use timed::domain::ports::{CustomerRepository, ProjectRepository, UserRepository};

/// Create a temporary test database file
///
/// Returns the directory guard together with a migrated pool on a file in it.
pub async fn temp_database() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path: PathBuf = dir.path().join("timed.db");
    let config = DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        max_connections: 2,
    };
    let pool = initialize_database(&config).await.expect("Failed to initialize database");
    (dir, pool)
}

/// Setup test logging
///
/// Call this at the beginning of tests that need log output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Tracker settings pointing both API templates at a mock server.
pub fn tracker_settings(server: &Server) -> TrackerSettings {
    TrackerSettings {
        github_api_url: format!("{}/repos/{{tracker_name}}/issues", server.url()),
        github_issue_url: "https://github.com/{tracker_name}/issues/{issue_id}".to_string(),
        redmine_api_url: format!("{}/projects/{{tracker_name}}/issues.json", server.url()),
        redmine_issue_url: "https://redmine.example.com/issues/{issue_id}".to_string(),
        request_timeout_secs: 5,
        ..TrackerSettings::default()
    }
}

pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    SqliteUserRepository::new(pool.clone())
        .create(&User::new(username))
        .await
        .expect("Failed to create user")
}

pub async fn seed_customer(pool: &SqlitePool, name: &str) -> Customer {
    SqliteCustomerRepository::new(pool.clone())
        .create(&Customer::new(name))
        .await
        .expect("Failed to create customer")
}

/// Create a project, optionally linked to a tracker.
pub async fn seed_project(
    pool: &SqlitePool,
    customer: &Customer,
    name: &str,
    tracker: Option<(TrackerType, &str, &str)>,
) -> Project {
    let mut project = Project::new(name, customer.id);
    if let Some((kind, tracker_name, api_key)) = tracker {
        project = project.with_tracker(kind, tracker_name, api_key);
    }
    SqliteProjectRepository::new(pool.clone())
        .create(&project)
        .await
        .expect("Failed to create project")
}

/// Router over `pool` with trackers built from `settings`.
pub fn app(pool: SqlitePool, settings: TrackerSettings) -> Router {
    let config = Config {
        trackers: settings,
        ..Config::default()
    };
    let trackers = TrackerRegistry::from_settings(&config.trackers).expect("Failed to build trackers");
    let state = AppState::new(pool, trackers, &config).expect("Failed to build state");
    build_router(Arc::new(state), &config.server)
}
