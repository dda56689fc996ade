//! Router assembly and the HTTP server loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::models::ServerConfig;

use super::issues::list_project_issues;
use super::resources::{
    create_activity, create_activity_block, create_attendance, create_customer, create_project, create_report,
    create_task, create_task_template, delete_activity, delete_activity_block, delete_attendance, delete_customer,
    delete_project, delete_report, delete_task, delete_task_template, get_activity, get_activity_block,
    get_attendance, get_customer, get_project, get_report, get_task, get_task_template, get_user, list_activities,
    list_activity_blocks, list_attendances, list_customers, list_projects, list_reports, list_task_templates,
    list_tasks, list_users, update_activity, update_activity_block, update_attendance, update_customer,
    update_project, update_report, update_task, update_task_template,
};
use super::state::AppState;

/// Build the API router.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/projects/{id}/issues", get(list_project_issues))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).patch(update_customer).delete(delete_customer),
        )
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).patch(update_task).delete(delete_task))
        .route("/task-templates", get(list_task_templates).post(create_task_template))
        .route(
            "/task-templates/{id}",
            get(get_task_template)
                .patch(update_task_template)
                .delete(delete_task_template),
        )
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity).patch(update_activity).delete(delete_activity),
        )
        .route("/activity-blocks", get(list_activity_blocks).post(create_activity_block))
        .route(
            "/activity-blocks/{id}",
            get(get_activity_block)
                .patch(update_activity_block)
                .delete(delete_activity_block),
        )
        .route("/attendances", get(list_attendances).post(create_attendance))
        .route(
            "/attendances/{id}",
            get(get_attendance).patch(update_attendance).delete(delete_attendance),
        )
        .route("/reports", get(list_reports).post(create_report))
        .route(
            "/reports/{id}",
            get(get_report).patch(update_report).delete(delete_report),
        );

    let app = Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_check))
        .with_state(state);

    if config.enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn serve<F>(state: Arc<AppState>, config: &ServerConfig, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let router = build_router(state, config);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Timed API listening");

    axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}

async fn health_check() -> &'static str {
    "OK"
}
