use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create leads table
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Leads::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Leads::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Leads::MissionId).uuid())
                    .col(ColumnDef::new(Leads::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Leads::FullName).string().not_null())
                    .col(ColumnDef::new(Leads::Title).string())
                    .col(ColumnDef::new(Leads::CompanyName).string())
                    .col(ColumnDef::new(Leads::Email).string())
                    .col(ColumnDef::new(Leads::LinkedinUrl).string())
                    .col(ColumnDef::new(Leads::Status).string().not_null())
                    .col(
                        ColumnDef::new(Leads::DoNotContact)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Leads::UpdatedAt)
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
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    OrganizationId,
    MissionId,
    CreatedBy,
    FullName,
    Title,
    CompanyName,
    Email,
    LinkedinUrl,
    Status,
    DoNotContact,
    CreatedAt,
    UpdatedAt,
}
