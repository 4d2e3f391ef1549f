use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create contacted_leads table
        manager
            .create_table(
                Table::create()
                    .table(ContactedLeads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactedLeads::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContactedLeads::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactedLeads::MissionId).uuid())
                    .col(ColumnDef::new(ContactedLeads::CampaignId).uuid().not_null())
                    .col(ColumnDef::new(ContactedLeads::LeadId).uuid().not_null())
                    .col(ColumnDef::new(ContactedLeads::Name).string().not_null())
                    .col(ColumnDef::new(ContactedLeads::Email).string().not_null())
                    .col(ColumnDef::new(ContactedLeads::Company).string())
                    .col(ColumnDef::new(ContactedLeads::Role).string())
                    .col(ColumnDef::new(ContactedLeads::Status).string().not_null())
                    .col(ColumnDef::new(ContactedLeads::Provider).string().not_null())
                    .col(
                        ColumnDef::new(ContactedLeads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContactedLeads::UpdatedAt)
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
            .drop_table(Table::drop().table(ContactedLeads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContactedLeads {
    Table,
    Id,
    OrganizationId,
    MissionId,
    CampaignId,
    LeadId,
    Name,
    Email,
    Company,
    Role,
    Status,
    Provider,
    CreatedAt,
    UpdatedAt,
}
