use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Task lifecycle status
///
/// Serialized as SCREAMING_SNAKE_CASE both on the wire and in the database,
/// so `InProgress` is always `IN_PROGRESS`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Initial status of every task
    #[default]
    #[sea_orm(string_value = "NEW")]
    New,
    /// Task being worked on
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Terminal status
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Task entity - represents a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier
    pub id: i64,
    /// Task title
    pub title: String,
    /// Task description (may be empty)
    pub description: String,
    /// Task status
    pub status: TaskStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// New task row ready for insertion.
///
/// Built by the service (or the seeder), never deserialized from clients:
/// the service decides `status` and `created_at`, not the caller.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// DTO for creating a new task
///
/// `status` is intentionally absent: created tasks always start as `NEW`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(
        custom(function = not_blank),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub title: String,
    /// Required field, but an empty string is accepted
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// DTO for partially updating an existing task
///
/// Absent fields are left untouched. Clearing `due_date` is not expressible
/// through this DTO; `null` and absent both mean "keep the current value".
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(
        custom(function = not_blank),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTask {
    /// True when the update carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

/// DTO for requesting a status change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StatusRequest {
    pub status: TaskStatus,
}

fn default_page_size() -> u64 {
    20
}

/// Pagination parameters for listing tasks
///
/// Zero-based `page`. Out-of-range values are rejected, not clamped.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub size: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

/// One page of tasks as returned by the repository
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Wire representation of a page of tasks
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPageResponse {
    pub content: Vec<Task>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Requested page size
    pub size: u64,
    /// Zero-based page number that was requested
    pub number: u64,
}

impl TaskPageResponse {
    pub fn new(page: TaskPage, query: &PageQuery) -> Self {
        Self {
            content: page.items,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            size: query.size,
            number: query.page,
        }
    }
}

impl Task {
    /// Apply updates from UpdateTask DTO
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
    }
}
