use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_missions_org")
                    .table(Missions::Table)
                    .col(Missions::OrganizationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_org_status")
                    .table(Leads::Table)
                    .col(Leads::OrganizationId)
                    .col(Leads::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacted_leads_org_created")
                    .table(ContactedLeads::Table)
                    .col(ContactedLeads::OrganizationId)
                    .col(ContactedLeads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_org_event")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::OrganizationId)
                    .col(ActivityLogs::EventType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_missions_org").table(Missions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_leads_org_status").table(Leads::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_contacted_leads_org_created")
                    .table(ContactedLeads::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_activity_logs_org_event")
                    .table(ActivityLogs::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Missions {
    Table,
    OrganizationId,
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    OrganizationId,
    Status,
}

#[derive(DeriveIden)]
enum ContactedLeads {
    Table,
    OrganizationId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    OrganizationId,
    EventType,
}
