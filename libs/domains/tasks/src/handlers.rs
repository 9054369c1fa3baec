use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{ErrorObject, ValidatedJson, ValidatedQuery};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, PageQuery, StatusRequest, Task, TaskPageResponse, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        create_task,
        get_task,
        update_task,
        delete_task,
        change_status
    ),
    components(schemas(
        Task,
        crate::models::TaskStatus,
        CreateTask,
        UpdateTask,
        StatusRequest,
        TaskPageResponse,
        ErrorObject
    )),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Build the tasks router with its state applied.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    Router::new()
        .route("/", get(list_tasks::<R>).post(create_task::<R>))
        .route(
            "/{id}",
            get(get_task::<R>)
                .put(update_task::<R>)
                .delete(delete_task::<R>),
        )
        .route("/{id}/status", patch(change_status::<R>))
        .with_state(Arc::new(service))
}

fn parse_id(raw: &str) -> TaskResult<i64> {
    raw.parse()
        .map_err(|_| TaskError::Validation(format!("Invalid task id: {}", raw)))
}

/// List tasks page by page
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of tasks", body = TaskPageResponse),
        (status = 400, description = "Invalid pagination parameters", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> TaskResult<Json<TaskPageResponse>> {
    let page = service.list_tasks(query.page, query.size).await?;
    Ok(Json(TaskPageResponse::new(page, &query)))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Invalid request", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Task not found or invalid id", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(parse_id(&id)?).await?;
    Ok(Json(task))
}

/// Partially update a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Invalid request or task not found", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(parse_id(&id)?, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, description = "Task not found or invalid id", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<StatusCode> {
    service.delete_task(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change a task's status
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed (or already at the target)", body = Task),
        (status = 400, description = "Illegal transition or task not found", body = ErrorObject),
        (status = 500, description = "Internal server error", body = ErrorObject)
    )
)]
pub async fn change_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<StatusRequest>,
) -> TaskResult<Json<Task>> {
    let task = service.change_status(parse_id(&id)?, request.status).await?;
    Ok(Json(task))
}
