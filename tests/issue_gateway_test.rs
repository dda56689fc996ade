//! Issue lookup against mock GitHub and Redmine servers, through the
//! service layer and a file-backed database.

mod common;

use std::sync::Arc;

use mockito::{Matcher, Server};
use timed::adapters::sqlite::SqliteProjectRepository;
use timed::adapters::trackers::TrackerRegistry;
use timed::domain::errors::DomainError;
use timed::domain::models::{IssueId, TrackerSettings, TrackerType};
use timed::services::IssueService;

use common::{seed_customer, seed_project, setup_test_logging, temp_database, tracker_settings};

fn service(pool: sqlx::SqlitePool, settings: &TrackerSettings) -> IssueService<SqliteProjectRepository> {
    let trackers = TrackerRegistry::from_settings(settings).unwrap();
    IssueService::new(Arc::new(SqliteProjectRepository::new(pool)), trackers)
}

#[tokio::test]
async fn test_github_issues_are_normalized() {
    setup_test_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/adfinis/timed/issues")
        .match_header("authorization", "token gh-key")
        .match_header("user-agent", "timed-api")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "title": "Bug", "state": "open"}, {"id": 5, "title": "Docs", "state": "closed"}]"#)
        .create_async()
        .await;

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let project = seed_project(&pool, &customer, "Timed", Some((TrackerType::GitHub, "adfinis/timed", "gh-key"))).await;

    let issues = service(pool, &tracker_settings(&server)).get_issues(project.id).await.unwrap();

    mock.assert_async().await;
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, IssueId::Number(1));
    assert_eq!(issues[0].title, "Bug");
    assert_eq!(issues[0].state, "Open");
    assert_eq!(issues[0].source.source_label(), "Github");
    assert_eq!(issues[0].url, "https://github.com/adfinis/timed/issues/1");
    assert_eq!(issues[1].state, "Closed");
    assert!(issues.iter().all(|issue| issue.project_id == project.id));
}

#[tokio::test]
async fn test_redmine_issues_with_basic_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/timed/issues.json")
        .match_header("x-redmine-api-key", "rm-key")
        .match_header("authorization", "Basic c3ZjOnMzY3JldA==")
        .with_status(200)
        .with_body(r#"{"issues": [{"id": 2, "subject": "Fix", "status": {"name": "closed"}}], "total_count": 1}"#)
        .create_async()
        .await;

    let settings = TrackerSettings {
        redmine_basic_auth_enabled: true,
        redmine_basic_auth_user: "svc".to_string(),
        redmine_basic_auth_password: "s3cret".to_string(),
        ..tracker_settings(&server)
    };

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let project = seed_project(&pool, &customer, "Timed", Some((TrackerType::Redmine, "timed", "rm-key"))).await;

    let issues = service(pool, &settings).get_issues(project.id).await.unwrap();

    mock.assert_async().await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Fix");
    assert_eq!(issues[0].state, "Closed");
    assert_eq!(issues[0].source.source_label(), "Redmine");
    assert_eq!(issues[0].url, "https://redmine.example.com/issues/2");
    assert_eq!(issues[0].project_id, project.id);
}

#[tokio::test]
async fn test_redmine_without_basic_auth_sends_only_api_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/timed/issues.json")
        .match_header("x-redmine-api-key", "rm-key")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"issues": []}"#)
        .create_async()
        .await;

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let project = seed_project(&pool, &customer, "Timed", Some((TrackerType::Redmine, "timed", "rm-key"))).await;

    let issues = service(pool, &tracker_settings(&server)).get_issues(project.id).await.unwrap();

    mock.assert_async().await;
    assert!(issues.is_empty());
}

#[tokio::test]
async fn test_project_without_tracker_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let project = seed_project(&pool, &customer, "Internal", None).await;

    let issues = service(pool, &tracker_settings(&server)).get_issues(project.id).await.unwrap();

    mock.assert_async().await;
    assert!(issues.is_empty());
}

#[tokio::test]
async fn test_unknown_project_fails_before_any_call() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let (_dir, pool) = temp_database().await;
    let err = service(pool, &tracker_settings(&server)).get_issues(404).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_upstream_failures_map_to_distinct_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/adfinis/unauthorized/issues")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/adfinis/broken/issues")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/adfinis/garbled/issues")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let unauthorized =
        seed_project(&pool, &customer, "A", Some((TrackerType::GitHub, "adfinis/unauthorized", "k"))).await;
    let broken = seed_project(&pool, &customer, "B", Some((TrackerType::GitHub, "adfinis/broken", "k"))).await;
    let garbled = seed_project(&pool, &customer, "C", Some((TrackerType::GitHub, "adfinis/garbled", "k"))).await;

    let service = service(pool, &tracker_settings(&server));

    assert!(matches!(
        service.get_issues(unauthorized.id).await,
        Err(DomainError::AuthenticationFailed { tracker: TrackerType::GitHub })
    ));
    assert!(matches!(
        service.get_issues(broken.id).await,
        Err(DomainError::UpstreamParseError { status: 500, .. })
    ));
    assert!(matches!(
        service.get_issues(garbled.id).await,
        Err(DomainError::UpstreamFormatError { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_tracker_is_unavailable() {
    let settings = TrackerSettings {
        github_api_url: "http://127.0.0.1:9/repos/{tracker_name}/issues".to_string(),
        request_timeout_secs: 2,
        ..TrackerSettings::default()
    };

    let (_dir, pool) = temp_database().await;
    let customer = seed_customer(&pool, "Adfinis").await;
    let project = seed_project(&pool, &customer, "Timed", Some((TrackerType::GitHub, "adfinis/timed", "k"))).await;

    let err = service(pool, &settings).get_issues(project.id).await.unwrap_err();
    assert!(matches!(err, DomainError::TrackerUnavailable { tracker: TrackerType::GitHub, .. }));
}
