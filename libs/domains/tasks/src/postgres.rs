use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    TransactionError, TransactionTrait,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task, TaskPage},
    repository::{MutationOutcome, TaskMutation, TaskRepository},
};

/// PostgreSQL-backed task repository.
///
/// Mutations run inside a transaction with `SELECT ... FOR UPDATE` on the
/// target row, so two concurrent status changes on the same task serialize
/// and the second one sees the first one's result.
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_page(&self, page: u64, size: u64) -> TaskResult<TaskPage> {
        if size == 0 {
            return Err(TaskError::Validation(
                "size: must be between 1 and 100".to_string(),
            ));
        }

        let paginator = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .paginate(&self.db, size);

        let totals = paginator.num_items_and_pages().await?;
        // Pages past the end are valid requests and come back empty
        let models = paginator.fetch_page(page).await?;

        Ok(TaskPage {
            items: models.into_iter().map(Into::into).collect(),
            total_elements: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn mutate(&self, id: i64, mutation: TaskMutation) -> TaskResult<Task> {
        let result = self
            .db
            .transaction::<_, Task, TaskError>(move |txn| {
                Box::pin(async move {
                    let model = entity::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or(TaskError::NotFound(id))?;

                    match mutation(model.into())? {
                        MutationOutcome::Persist(task) => {
                            let active_model: entity::ActiveModel = task.into();
                            let updated = active_model.update(txn).await?;
                            Ok(updated.into())
                        }
                        MutationOutcome::Unchanged(task) => Ok(task),
                    }
                })
            })
            .await;

        match result {
            Ok(task) => Ok(task),
            Err(TransactionError::Connection(e)) => Err(e.into()),
            Err(TransactionError::Transaction(e)) => Err(e),
        }
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> TaskResult<u64> {
        let count = entity::Entity::find().count(&self.db).await?;
        Ok(count)
    }
}
