use crate::models::{NewTask, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTimeWithTimeZone,
    pub due_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            created_at: model.created_at.into(),
            due_date: model.due_date.map(Into::into),
        }
    }
}

// Conversion from NewTask to Sea-ORM ActiveModel; the id comes from the
// database sequence
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            status: Set(input.status),
            created_at: Set(input.created_at.into()),
            due_date: Set(input.due_date.map(Into::into)),
        }
    }
}

// Full-row conversion used when persisting a mutated task
impl From<crate::models::Task> for ActiveModel {
    fn from(task: crate::models::Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            status: Set(task.status),
            created_at: Set(task.created_at.into()),
            due_date: Set(task.due_date.map(Into::into)),
        }
    }
}
