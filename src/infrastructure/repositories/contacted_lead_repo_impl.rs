// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::lead::ContactedLead;
use crate::domain::repositories::contacted_lead_repository::ContactedLeadRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::contacted_lead as contacted_entity;

/// 外联入队记录仓库实现
#[derive(Clone)]
pub struct ContactedLeadRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ContactedLeadRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactedLeadRepository for ContactedLeadRepositoryImpl {
    async fn insert_many(&self, records: &[ContactedLead]) -> Result<(), RepositoryError> {
        if records.is_empty() {
            return Ok(());
        }

        let models: Vec<contacted_entity::ActiveModel> = records
            .iter()
            .map(|record| contacted_entity::ActiveModel {
                id: Set(record.id),
                organization_id: Set(record.organization_id),
                mission_id: Set(record.mission_id),
                campaign_id: Set(record.campaign_id),
                lead_id: Set(record.lead_id),
                name: Set(record.name.clone()),
                email: Set(record.email.clone()),
                company: Set(record.company.clone()),
                role: Set(record.role.clone()),
                status: Set(record.status.clone()),
                provider: Set(record.provider.clone()),
                created_at: Set(record.created_at),
                updated_at: Set(record.updated_at),
            })
            .collect();

        contacted_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn count_created_since(
        &self,
        organization_id: Uuid,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError> {
        let count = contacted_entity::Entity::find()
            .filter(contacted_entity::Column::OrganizationId.eq(organization_id))
            .filter(contacted_entity::Column::CreatedAt.gte(since))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_created_since_by_mission(
        &self,
        mission_id: Uuid,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError> {
        let count = contacted_entity::Entity::find()
            .filter(contacted_entity::Column::MissionId.eq(mission_id))
            .filter(contacted_entity::Column::CreatedAt.gte(since))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}
