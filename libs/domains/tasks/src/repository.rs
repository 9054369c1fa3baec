use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskPage};

/// Outcome of a [`TaskMutation`].
#[derive(Debug)]
pub enum MutationOutcome {
    /// Persist the mutated task and return the stored row
    Persist(Task),
    /// Leave the stored row untouched and return the task as-is
    Unchanged(Task),
}

/// A fetch-check-mutate step applied to a single task.
///
/// The repository runs the closure inside its unit of work (a transaction
/// with a row lock for PostgreSQL, a write lock for the in-memory store), so
/// the decision is made against the current state and no concurrent write
/// can interleave. Business rules such as the transition policy live in the
/// closure, not in the repository.
pub type TaskMutation = Box<dyn FnOnce(Task) -> TaskResult<MutationOutcome> + Send>;

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (PostgreSQL, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return it with its assigned id
    async fn insert(&self, input: NewTask) -> TaskResult<Task>;

    /// Get a task by id
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Fetch one page of tasks ordered by ascending id
    async fn list_page(&self, page: u64, size: u64) -> TaskResult<TaskPage>;

    /// Atomically load a task, apply the mutation, and persist the outcome.
    ///
    /// Fails with [`TaskError::NotFound`] when the id does not exist, or
    /// with whatever error the mutation itself returns.
    async fn mutate(&self, id: i64, mutation: TaskMutation) -> TaskResult<Task>;

    /// Delete a task by id, returning whether a row was removed
    async fn delete_by_id(&self, id: i64) -> TaskResult<bool>;

    /// Count all tasks
    async fn count(&self) -> TaskResult<u64>;
}

struct InMemoryState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

/// In-memory repository backed by an ordered map.
///
/// Mirrors the PostgreSQL implementation's semantics (id ordering, atomic
/// mutations) and is used by tests and local experiments.
pub struct InMemoryTaskRepository {
    state: RwLock<InMemoryState>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(InMemoryState {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let task = Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            created_at: input.created_at,
            due_date: input.due_date,
        };
        state.tasks.insert(id, task.clone());

        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_page(&self, page: u64, size: u64) -> TaskResult<TaskPage> {
        if size == 0 {
            return Err(TaskError::Validation(
                "size: must be between 1 and 100".to_string(),
            ));
        }

        let state = self.state.read().await;
        let total_elements = state.tasks.len() as u64;
        let total_pages = total_elements.div_ceil(size);

        // A page index past the end (including one whose offset overflows)
        // is a valid request and comes back empty
        let items = match page.checked_mul(size) {
            Some(offset) => state
                .tasks
                .values()
                .skip(offset as usize)
                .take(size as usize)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        Ok(TaskPage {
            items,
            total_elements,
            total_pages,
        })
    }

    async fn mutate(&self, id: i64, mutation: TaskMutation) -> TaskResult<Task> {
        // The write guard is held across fetch, mutation, and store
        let mut state = self.state.write().await;

        let current = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskError::NotFound(id))?;

        match mutation(current)? {
            MutationOutcome::Persist(task) => {
                state.tasks.insert(id, task.clone());
                Ok(task)
            }
            MutationOutcome::Unchanged(task) => Ok(task),
        }
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn count(&self) -> TaskResult<u64> {
        let state = self.state.read().await;
        Ok(state.tasks.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::Utc;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::New,
            created_at: Utc::now(),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert(new_task("a")).await.unwrap();
        let second = repo.insert(new_task("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_page_orders_by_id() {
        let repo = InMemoryTaskRepository::new();
        for i in 0..5 {
            repo.insert(new_task(&format!("task {}", i))).await.unwrap();
        }

        let page = repo.list_page(1, 2).await.unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(
            page.items.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![3, 4]
        );
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_empty() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(new_task("only")).await.unwrap();

        let page = repo.list_page(7, 20).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_page_overflowing_offset_is_empty() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(new_task("only")).await.unwrap();

        let page = repo.list_page(u64::MAX / 2, 20).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_page_empty_store_has_zero_pages() {
        let repo = InMemoryTaskRepository::new();

        let page = repo.list_page(0, 20).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_mutate_missing_id() {
        let repo = InMemoryTaskRepository::new();

        let result = repo
            .mutate(99, Box::new(|task| Ok(MutationOutcome::Persist(task))))
            .await;

        assert!(matches!(result, Err(TaskError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_mutate_unchanged_does_not_write() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert(new_task("keep")).await.unwrap();

        let returned = repo
            .mutate(
                task.id,
                Box::new(|mut task| {
                    task.title = "mutated copy".to_string();
                    Ok(MutationOutcome::Unchanged(task))
                }),
            )
            .await
            .unwrap();

        // The closure's copy is returned but the store keeps the original
        assert_eq!(returned.title, "mutated copy");
        let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "keep");
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert(new_task("doomed")).await.unwrap();

        assert!(repo.delete_by_id(task.id).await.unwrap());
        assert!(!repo.delete_by_id(task.id).await.unwrap());
        assert_eq!(repo.find_by_id(task.id).await.unwrap(), None);
    }
}
