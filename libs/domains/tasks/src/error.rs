use axum::response::{IntoResponse, Response};
use axum_helpers::ErrorObject;
use thiserror::Error;

use crate::models::TaskStatus;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: TaskStatus, to: TaskStatus },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to the standardized error body.
///
/// The symbolic `message` values are a stable contract with clients; the
/// `humanMessage` wording is too. Internal details are logged here and never
/// leak into the response.
impl From<TaskError> for ErrorObject {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => {
                ErrorObject::new(400, "task.not_found", format!("Task not found: {}", id))
            }
            TaskError::InvalidStatusTransition { from, to } => ErrorObject::new(
                400,
                "task.invalid_status_transition",
                format!("Invalid status transition from {} to {}", from, to),
            ),
            TaskError::Validation(message) => ErrorObject::validation(message),
            TaskError::Database(detail) => {
                tracing::error!("Database error: {}", detail);
                ErrorObject::internal()
            }
            TaskError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorObject::internal()
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        ErrorObject::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}
