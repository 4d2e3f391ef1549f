use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create agent_tasks table
        manager
            .create_table(
                Table::create()
                    .table(AgentTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AgentTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AgentTasks::MissionId).uuid().not_null())
                    .col(
                        ColumnDef::new(AgentTasks::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AgentTasks::TaskType).string().not_null())
                    .col(ColumnDef::new(AgentTasks::Status).string().not_null())
                    .col(ColumnDef::new(AgentTasks::Payload).json().not_null())
                    .col(ColumnDef::new(AgentTasks::Result).json())
                    .col(ColumnDef::new(AgentTasks::ErrorMessage).text())
                    .col(ColumnDef::new(AgentTasks::StartedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AgentTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AgentTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agent_tasks_status")
                    .table(AgentTasks::Table)
                    .col(AgentTasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agent_tasks_mission_status")
                    .table(AgentTasks::Table)
                    .col(AgentTasks::MissionId)
                    .col(AgentTasks::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AgentTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AgentTasks {
    Table,
    Id,
    MissionId,
    OrganizationId,
    TaskType,
    Status,
    Payload,
    Result,
    ErrorMessage,
    StartedAt,
    CreatedAt,
    UpdatedAt,
}
