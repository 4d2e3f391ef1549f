use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create daily_usage table
        manager
            .create_table(
                Table::create()
                    .table(DailyUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyUsage::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyUsage::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyUsage::UsageDate).date().not_null())
                    .col(
                        ColumnDef::new(DailyUsage::LeadsSearched)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyUsage::LeadsEnriched)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyUsage::LeadsInvestigated)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyUsage::SearchRuns)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyUsage::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One ledger row per organization per day
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_usage_org_date")
                    .table(DailyUsage::Table)
                    .col(DailyUsage::OrganizationId)
                    .col(DailyUsage::UsageDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyUsage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DailyUsage {
    Table,
    Id,
    OrganizationId,
    UsageDate,
    LeadsSearched,
    LeadsEnriched,
    LeadsInvestigated,
    SearchRuns,
    UpdatedAt,
}
