use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, NewTask, Task, TaskPage, TaskStatus, UpdateTask};
use crate::repository::{MutationOutcome, TaskRepository};
use crate::transitions::is_transition_allowed;

/// Service layer for Task business logic.
///
/// The service owns every decision about a task's content and status. The
/// repository only moves data; in particular, a status only ever changes
/// through [`TaskService::change_status`].
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

// Manual impl to avoid requiring R: Clone
impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task.
    ///
    /// The client does not choose the status: every task starts as `NEW`,
    /// with `created_at` stamped here.
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository
            .insert(NewTask {
                title: input.title,
                description: input.description,
                status: TaskStatus::New,
                created_at: Utc::now(),
                due_date: input.due_date,
            })
            .await
    }

    /// Get a task by id
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List one page of tasks ordered by ascending id
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, page: u64, size: u64) -> TaskResult<TaskPage> {
        self.repository.list_page(page, size).await
    }

    /// Partially update a task's content.
    ///
    /// Only the provided fields change; the status is untouched. An update
    /// with no fields reads the task without writing it.
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i64, input: UpdateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository
            .mutate(
                id,
                Box::new(move |mut task| {
                    if input.is_empty() {
                        return Ok(MutationOutcome::Unchanged(task));
                    }
                    task.apply_update(input);
                    Ok(MutationOutcome::Persist(task))
                }),
            )
            .await
    }

    /// Move a task to a new status.
    ///
    /// Requesting the current status is a no-op success. Anything else must
    /// be allowed by the transition policy, checked against the stored
    /// status inside the repository's unit of work.
    #[instrument(skip(self), fields(task_id = id, target = %target))]
    pub async fn change_status(&self, id: i64, target: TaskStatus) -> TaskResult<Task> {
        self.repository
            .mutate(
                id,
                Box::new(move |mut task| {
                    if task.status == target {
                        return Ok(MutationOutcome::Unchanged(task));
                    }
                    if !is_transition_allowed(task.status, target) {
                        return Err(TaskError::InvalidStatusTransition {
                            from: task.status,
                            to: target,
                        });
                    }
                    task.status = target;
                    Ok(MutationOutcome::Persist(task))
                }),
            )
            .await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }

    /// Count all tasks
    pub async fn count_tasks(&self) -> TaskResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryTaskRepository, MockTaskRepository};

    fn service() -> TaskService<InMemoryTaskRepository> {
        TaskService::new(InMemoryTaskRepository::new())
    }

    fn create_input(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: "details".to_string(),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_created_task_starts_as_new() {
        let service = service();

        let task = service.create_task(create_input("Write docs")).await.unwrap();

        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.title, "Write docs");
        assert!(task.id > 0);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let service = service();

        let result = service.create_task(create_input("  ")).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
        assert_eq!(service.count_tasks().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let service = service();

        let result = service.get_task(5).await;

        assert!(matches!(result, Err(TaskError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_changes_only_provided_fields() {
        let service = service();
        let task = service.create_task(create_input("Original")).await.unwrap();

        let updated = service
            .update_task(
                task.id,
                UpdateTask {
                    description: Some("rewritten".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Original");
        assert_eq!(updated.description, "rewritten");
        assert_eq!(updated.status, TaskStatus::New);
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_update_never_touches_status() {
        let service = service();
        let task = service.create_task(create_input("Task")).await.unwrap();
        service
            .change_status(task.id, TaskStatus::InProgress)
            .await
            .unwrap();

        let updated = service
            .update_task(
                task.id,
                UpdateTask {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_empty_update_returns_task() {
        let service = service();
        let task = service.create_task(create_input("Task")).await.unwrap();

        let result = service
            .update_task(task.id, UpdateTask::default())
            .await
            .unwrap();

        assert_eq!(result, task);
    }

    #[tokio::test]
    async fn test_empty_update_still_reports_missing_id() {
        let service = service();

        let result = service.update_task(404, UpdateTask::default()).await;

        assert!(matches!(result, Err(TaskError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = service();
        let task = service.create_task(create_input("Lifecycle")).await.unwrap();

        let task = service
            .change_status(task.id, TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);

        let task = service
            .change_status(task.id, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_skipping_a_step_is_rejected() {
        let service = service();
        let task = service.create_task(create_input("Eager")).await.unwrap();

        let result = service.change_status(task.id, TaskStatus::Completed).await;

        assert!(matches!(
            result,
            Err(TaskError::InvalidStatusTransition {
                from: TaskStatus::New,
                to: TaskStatus::Completed,
            })
        ));

        // The stored task is untouched
        let stored = service.get_task(task.id).await.unwrap();
        assert_eq!(stored.status, TaskStatus::New);
    }

    #[tokio::test]
    async fn test_completed_tasks_cannot_reopen() {
        let service = service();
        let task = service.create_task(create_input("Done")).await.unwrap();
        service
            .change_status(task.id, TaskStatus::InProgress)
            .await
            .unwrap();
        service
            .change_status(task.id, TaskStatus::Completed)
            .await
            .unwrap();

        let result = service.change_status(task.id, TaskStatus::New).await;

        assert!(matches!(
            result,
            Err(TaskError::InvalidStatusTransition {
                from: TaskStatus::Completed,
                to: TaskStatus::New,
            })
        ));
    }

    #[tokio::test]
    async fn test_self_transition_is_a_noop() {
        let service = service();
        let task = service.create_task(create_input("Idle")).await.unwrap();

        let result = service.change_status(task.id, TaskStatus::New).await.unwrap();

        assert_eq!(result, task);
    }

    #[tokio::test]
    async fn test_delete_missing_task() {
        let service = service();

        let result = service.delete_task(1).await;

        assert!(matches!(result, Err(TaskError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let service = service();
        for i in 0..3 {
            service
                .create_task(create_input(&format!("task {}", i)))
                .await
                .unwrap();
        }

        let page = service.list_tasks(0, 2).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);

        let page = service.list_tasks(1, 2).await.unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_repository_errors_surface_unchanged() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_delete_by_id()
            .return_once(|_| Err(TaskError::Database("connection reset".to_string())));

        let service = TaskService::new(repository);
        let result = service.delete_task(1).await;

        assert!(matches!(result, Err(TaskError::Database(_))));
    }
}
