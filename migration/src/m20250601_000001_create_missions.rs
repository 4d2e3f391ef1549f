use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create missions table
        manager
            .create_table(
                Table::create()
                    .table(Missions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Missions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Missions::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Missions::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Missions::Title).string().not_null())
                    .col(ColumnDef::new(Missions::Goal).text())
                    .col(ColumnDef::new(Missions::Status).string().not_null())
                    .col(ColumnDef::new(Missions::Params).json().not_null())
                    .col(
                        ColumnDef::new(Missions::DailySearchLimit)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(Missions::DailyEnrichLimit)
                            .integer()
                            .not_null()
                            .default(50),
                    )
                    .col(
                        ColumnDef::new(Missions::DailyInvestigateLimit)
                            .integer()
                            .not_null()
                            .default(20),
                    )
                    .col(
                        ColumnDef::new(Missions::DailyContactLimit)
                            .integer()
                            .not_null()
                            .default(25),
                    )
                    .col(
                        ColumnDef::new(Missions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Missions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Missions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Missions {
    Table,
    Id,
    OrganizationId,
    OwnerId,
    Title,
    Goal,
    Status,
    Params,
    DailySearchLimit,
    DailyEnrichLimit,
    DailyInvestigateLimit,
    DailyContactLimit,
    CreatedAt,
    UpdatedAt,
}
