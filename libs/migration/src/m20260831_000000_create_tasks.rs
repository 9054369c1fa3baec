use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create task_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values([TaskStatus::New, TaskStatus::InProgress, TaskStatus::Completed])
                    .to_owned(),
            )
            .await?;

        // Create tasks table
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Tasks::Id))
                    .col(string(Tasks::Title))
                    .col(text(Tasks::Description).default(""))
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .enumeration(
                                TaskStatus::Enum,
                                [TaskStatus::New, TaskStatus::InProgress, TaskStatus::Completed],
                            )
                            .not_null()
                            .default("NEW"),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Tasks::DueDate))
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_status")
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_created_at")
                    .table(Tasks::Table)
                    .col(Tasks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    CreatedAt,
    DueDate,
}

#[derive(DeriveIden)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "NEW")]
    New,
    #[sea_orm(iden = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(iden = "COMPLETED")]
    Completed,
}
