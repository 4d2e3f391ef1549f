use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create activity_logs table (append-only)
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::MissionId).uuid())
                    .col(
                        ColumnDef::new(ActivityLogs::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityLogs::Level).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::Message).text().not_null())
                    .col(ColumnDef::new(ActivityLogs::Details).json())
                    .col(ColumnDef::new(ActivityLogs::EventType).string())
                    .col(ColumnDef::new(ActivityLogs::Outcome).string())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
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
                    .name("idx_activity_logs_mission_created")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::MissionId)
                    .col(ActivityLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    MissionId,
    OrganizationId,
    Level,
    Message,
    Details,
    EventType,
    Outcome,
    CreatedAt,
}
