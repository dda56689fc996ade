//! CRUD handlers for the resource endpoints.
//!
//! Create and `PATCH` share one payload type per resource: every field is
//! optional, creation starts from an empty record and a patch starts from
//! the stored one. Nullable fields use [`nullable`] so that `null` clears
//! them while an absent field leaves them untouched.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::errors::DomainError;
use crate::domain::models::{
    Activity, ActivityBlock, Attendance, Customer, Page, Project, Report, Task, TaskTemplate, TrackerType, User,
};
use crate::domain::ports::{
    ActivityBlockFilter, ActivityFilter, AttendanceFilter, CustomerFilter, ProjectFilter, ReportFilter, TaskFilter,
    UserFilter,
};

use super::error::{ApiError, ApiResult};
use super::extract::{nullable, ApiJson, ApiQuery, Caller, ListParams};
use super::state::AppState;

type Shared = State<Arc<AppState>>;
type Created<T> = ApiResult<(StatusCode, Json<T>)>;

fn required<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::from(DomainError::ValidationFailed(format!("{field} is required"))))
}

fn created<T>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}

// Users

pub async fn list_users(
    State(state): Shared,
    _caller: Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<User>>> {
    let filter = UserFilter {
        username: params.username.clone(),
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.users.list(filter, page).await?))
}

pub async fn get_user(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get(id).await?))
}

// Customers

#[derive(Debug, Default, Deserialize)]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub comment: Option<String>,
    pub archived: Option<bool>,
}

impl CustomerPayload {
    fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(website) = self.website {
            customer.website = website;
        }
        if let Some(comment) = self.comment {
            customer.comment = comment;
        }
        if let Some(archived) = self.archived {
            customer.archived = archived;
        }
    }
}

pub async fn list_customers(
    State(state): Shared,
    _caller: Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Customer>>> {
    let filter = CustomerFilter {
        search: params.search.clone(),
        include_archived: false,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.customers.list(filter, page).await?))
}

pub async fn get_customer(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<Json<Customer>> {
    Ok(Json(state.customers.get(id).await?))
}

pub async fn create_customer(
    State(state): Shared,
    _caller: Caller,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Created<Customer> {
    let mut customer = Customer::new("");
    payload.apply(&mut customer);
    Ok(created(state.customers.create(customer).await?))
}

pub async fn update_customer(
    State(state): Shared,
    _caller: Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> ApiResult<Json<Customer>> {
    let mut customer = state.customers.get(id).await?;
    payload.apply(&mut customer);
    Ok(Json(state.customers.update(customer).await?))
}

pub async fn delete_customer(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Projects

#[derive(Debug, Default, Deserialize)]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub customer_id: Option<i64>,
    pub comment: Option<String>,
    pub archived: Option<bool>,
    /// `GH`, `RM`, or anything else for no tracker.
    #[serde(default, deserialize_with = "nullable")]
    pub tracker_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tracker_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tracker_api_key: Option<Option<String>>,
}

impl ProjectPayload {
    fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(customer_id) = self.customer_id {
            project.customer_id = customer_id;
        }
        if let Some(comment) = self.comment {
            project.comment = comment;
        }
        if let Some(archived) = self.archived {
            project.archived = archived;
        }
        if let Some(code) = self.tracker_type {
            project.tracker_type = code.as_deref().and_then(TrackerType::from_code);
        }
        if let Some(name) = self.tracker_name {
            project.tracker_name = name;
        }
        if let Some(key) = self.tracker_api_key {
            project.tracker_api_key = key;
        }
    }
}

pub async fn list_projects(
    State(state): Shared,
    _caller: Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Project>>> {
    let filter = ProjectFilter {
        customer_id: params.customer,
        search: params.search.clone(),
        include_archived: false,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.projects.list(filter, page).await?))
}

pub async fn get_project(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<Json<Project>> {
    Ok(Json(state.projects.get(id).await?))
}

pub async fn create_project(
    State(state): Shared,
    _caller: Caller,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Created<Project> {
    let customer_id = required(payload.customer_id, "customer_id")?;
    let mut project = Project::new("", customer_id);
    payload.apply(&mut project);
    Ok(created(state.projects.create(project).await?))
}

pub async fn update_project(
    State(state): Shared,
    _caller: Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> ApiResult<Json<Project>> {
    let mut project = state.projects.get(id).await?;
    payload.apply(&mut project);
    Ok(Json(state.projects.update(project).await?))
}

pub async fn delete_project(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Tasks

#[derive(Debug, Default, Deserialize)]
pub struct TaskPayload {
    pub name: Option<String>,
    pub project_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub estimated_hours: Option<Option<f64>>,
    pub archived: Option<bool>,
}

impl TaskPayload {
    fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(hours) = self.estimated_hours {
            task.estimated_hours = hours;
        }
        if let Some(archived) = self.archived {
            task.archived = archived;
        }
    }
}

pub async fn list_tasks(
    State(state): Shared,
    _caller: Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Task>>> {
    let filter = TaskFilter {
        project_id: params.project,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.tasks.list_tasks(filter, page).await?))
}

pub async fn get_task(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<Json<Task>> {
    Ok(Json(state.tasks.get_task(id).await?))
}

pub async fn create_task(State(state): Shared, _caller: Caller, ApiJson(payload): ApiJson<TaskPayload>) -> Created<Task> {
    let project_id = required(payload.project_id, "project_id")?;
    let mut task = Task::new("", project_id);
    payload.apply(&mut task);
    Ok(created(state.tasks.create_task(task).await?))
}

pub async fn update_task(
    State(state): Shared,
    _caller: Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<TaskPayload>,
) -> ApiResult<Json<Task>> {
    let mut task = state.tasks.get_task(id).await?;
    payload.apply(&mut task);
    Ok(Json(state.tasks.update_task(task).await?))
}

pub async fn delete_task(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.tasks.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Task templates

#[derive(Debug, Default, Deserialize)]
pub struct TaskTemplatePayload {
    pub name: Option<String>,
}

pub async fn list_task_templates(
    State(state): Shared,
    _caller: Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<TaskTemplate>>> {
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.tasks.list_templates(page).await?))
}

pub async fn get_task_template(
    State(state): Shared,
    _caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskTemplate>> {
    Ok(Json(state.tasks.get_template(id).await?))
}

pub async fn create_task_template(
    State(state): Shared,
    _caller: Caller,
    ApiJson(payload): ApiJson<TaskTemplatePayload>,
) -> Created<TaskTemplate> {
    let template = TaskTemplate::new(payload.name.unwrap_or_default());
    Ok(created(state.tasks.create_template(template).await?))
}

pub async fn update_task_template(
    State(state): Shared,
    _caller: Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<TaskTemplatePayload>,
) -> ApiResult<Json<TaskTemplate>> {
    let mut template = state.tasks.get_template(id).await?;
    if let Some(name) = payload.name {
        template.name = name;
    }
    Ok(Json(state.tasks.update_template(template).await?))
}

pub async fn delete_task_template(State(state): Shared, _caller: Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.tasks.delete_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Activities

#[derive(Debug, Default, Deserialize)]
pub struct ActivityPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub task_id: Option<Option<i64>>,
    pub comment: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
}

impl ActivityPayload {
    fn apply(self, activity: &mut Activity) {
        if let Some(task_id) = self.task_id {
            activity.task_id = task_id;
        }
        if let Some(comment) = self.comment {
            activity.comment = comment;
        }
        if let Some(start) = self.start_datetime {
            activity.start_datetime = start;
        }
    }
}

pub async fn list_activities(
    State(state): Shared,
    Caller(caller): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Activity>>> {
    let filter = ActivityFilter {
        user_id: None,
        task_id: params.task,
        day: params.day()?,
        active: params.active(),
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.activities.list_activities(&caller, filter, page).await?))
}

pub async fn get_activity(State(state): Shared, Caller(caller): Caller, Path(id): Path<i64>) -> ApiResult<Json<Activity>> {
    Ok(Json(state.activities.get_activity(&caller, id).await?))
}

pub async fn create_activity(
    State(state): Shared,
    Caller(caller): Caller,
    ApiJson(payload): ApiJson<ActivityPayload>,
) -> Created<Activity> {
    let mut activity = Activity::new(caller.id, Utc::now());
    payload.apply(&mut activity);
    Ok(created(state.activities.create_activity(&caller, activity).await?))
}

pub async fn update_activity(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ActivityPayload>,
) -> ApiResult<Json<Activity>> {
    let mut activity = state.activities.get_activity(&caller, id).await?;
    payload.apply(&mut activity);
    Ok(Json(state.activities.update_activity(&caller, activity).await?))
}

pub async fn delete_activity(State(state): Shared, Caller(caller): Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.activities.delete_activity(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Activity blocks

#[derive(Debug, Default, Deserialize)]
pub struct ActivityBlockPayload {
    pub activity_id: Option<i64>,
    pub from_datetime: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub to_datetime: Option<Option<DateTime<Utc>>>,
}

impl ActivityBlockPayload {
    fn apply(self, block: &mut ActivityBlock) {
        if let Some(activity_id) = self.activity_id {
            block.activity_id = activity_id;
        }
        if let Some(from) = self.from_datetime {
            block.from_datetime = from;
        }
        if let Some(to) = self.to_datetime {
            block.to_datetime = to;
        }
    }
}

pub async fn list_activity_blocks(
    State(state): Shared,
    Caller(caller): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<ActivityBlock>>> {
    let filter = ActivityBlockFilter {
        user_id: None,
        activity_id: params.activity,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.activities.list_blocks(&caller, filter, page).await?))
}

pub async fn get_activity_block(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> ApiResult<Json<ActivityBlock>> {
    Ok(Json(state.activities.get_block(&caller, id).await?))
}

pub async fn create_activity_block(
    State(state): Shared,
    Caller(caller): Caller,
    ApiJson(payload): ApiJson<ActivityBlockPayload>,
) -> Created<ActivityBlock> {
    let activity_id = required(payload.activity_id, "activity_id")?;
    let mut block = ActivityBlock::start(activity_id, Utc::now());
    payload.apply(&mut block);
    Ok(created(state.activities.create_block(&caller, block).await?))
}

pub async fn update_activity_block(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ActivityBlockPayload>,
) -> ApiResult<Json<ActivityBlock>> {
    let mut block = state.activities.get_block(&caller, id).await?;
    payload.apply(&mut block);
    Ok(Json(state.activities.update_block(&caller, block).await?))
}

pub async fn delete_activity_block(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.activities.delete_block(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Attendances

#[derive(Debug, Default, Deserialize)]
pub struct AttendancePayload {
    pub from_datetime: Option<DateTime<Utc>>,
    pub to_datetime: Option<DateTime<Utc>>,
}

pub async fn list_attendances(
    State(state): Shared,
    Caller(caller): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Attendance>>> {
    let filter = AttendanceFilter {
        user_id: None,
        day: params.day()?,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.attendances.list(&caller, filter, page).await?))
}

pub async fn get_attendance(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> ApiResult<Json<Attendance>> {
    Ok(Json(state.attendances.get(&caller, id).await?))
}

pub async fn create_attendance(
    State(state): Shared,
    Caller(caller): Caller,
    ApiJson(payload): ApiJson<AttendancePayload>,
) -> Created<Attendance> {
    let attendance = Attendance::new(
        caller.id,
        required(payload.from_datetime, "from_datetime")?,
        required(payload.to_datetime, "to_datetime")?,
    );
    Ok(created(state.attendances.create(&caller, attendance).await?))
}

pub async fn update_attendance(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<AttendancePayload>,
) -> ApiResult<Json<Attendance>> {
    let mut attendance = state.attendances.get(&caller, id).await?;
    if let Some(from) = payload.from_datetime {
        attendance.from_datetime = from;
    }
    if let Some(to) = payload.to_datetime {
        attendance.to_datetime = to;
    }
    Ok(Json(state.attendances.update(&caller, attendance).await?))
}

pub async fn delete_attendance(State(state): Shared, Caller(caller): Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.attendances.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Reports

#[derive(Debug, Default, Deserialize)]
pub struct ReportPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub task_id: Option<Option<i64>>,
    pub date: Option<NaiveDate>,
    /// Seconds.
    pub duration: Option<i64>,
    pub comment: Option<String>,
    pub review: Option<bool>,
    pub not_billable: Option<bool>,
}

impl ReportPayload {
    fn apply(self, report: &mut Report) {
        if let Some(task_id) = self.task_id {
            report.task_id = task_id;
        }
        if let Some(date) = self.date {
            report.date = date;
        }
        if let Some(duration) = self.duration {
            report.duration = duration;
        }
        if let Some(comment) = self.comment {
            report.comment = comment;
        }
        if let Some(review) = self.review {
            report.review = review;
        }
        if let Some(not_billable) = self.not_billable {
            report.not_billable = not_billable;
        }
    }
}

pub async fn list_reports(
    State(state): Shared,
    Caller(caller): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Page<Report>>> {
    let filter = ReportFilter {
        user_id: None,
        task_id: params.task,
    };
    let page = state.page_request(params.page, params.page_size);
    Ok(Json(state.reports.list(&caller, filter, page).await?))
}

pub async fn get_report(State(state): Shared, Caller(caller): Caller, Path(id): Path<i64>) -> ApiResult<Json<Report>> {
    Ok(Json(state.reports.get(&caller, id).await?))
}

pub async fn create_report(
    State(state): Shared,
    Caller(caller): Caller,
    ApiJson(payload): ApiJson<ReportPayload>,
) -> Created<Report> {
    let date = required(payload.date, "date")?;
    let mut report = Report::new(caller.id, date, 0);
    payload.apply(&mut report);
    Ok(created(state.reports.create(&caller, report).await?))
}

pub async fn update_report(
    State(state): Shared,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReportPayload>,
) -> ApiResult<Json<Report>> {
    let mut report = state.reports.get(&caller, id).await?;
    payload.apply(&mut report);
    Ok(Json(state.reports.update(&caller, report).await?))
}

pub async fn delete_report(State(state): Shared, Caller(caller): Caller, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.reports.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_payload_clears_tracker_with_null() {
        let mut project = Project::new("Timed", 1).with_tracker(TrackerType::GitHub, "adfinis/timed", "key");
        let payload: ProjectPayload = serde_json::from_str(r#"{"tracker_type": null, "comment": "moved"}"#).unwrap();
        payload.apply(&mut project);

        assert_eq!(project.tracker_type, None);
        assert_eq!(project.tracker_name(), "adfinis/timed");
        assert_eq!(project.comment, "moved");
    }

    #[test]
    fn test_project_payload_unknown_tracker_code_means_none() {
        let mut project = Project::new("Timed", 1);
        let payload: ProjectPayload = serde_json::from_str(r#"{"tracker_type": "JI"}"#).unwrap();
        payload.apply(&mut project);
        assert_eq!(project.tracker_type, None);

        let payload: ProjectPayload = serde_json::from_str(r#"{"tracker_type": "RM", "tracker_name": "timed"}"#).unwrap();
        payload.apply(&mut project);
        assert_eq!(project.tracker_type, Some(TrackerType::Redmine));
    }

    #[test]
    fn test_block_payload_stops_running_block() {
        let start = Utc::now();
        let mut block = ActivityBlock::start(1, start);
        let payload: ActivityBlockPayload =
            serde_json::from_str(r#"{"to_datetime": "2030-01-01T10:00:00Z"}"#).unwrap();
        payload.apply(&mut block);
        assert!(!block.is_open());
        assert_eq!(block.from_datetime, start);
    }
}
