// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::campaign::Campaign;
use crate::domain::repositories::campaign_repository::CampaignRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::campaign as campaign_entity;

/// 外联活动仓库实现
#[derive(Clone)]
pub struct CampaignRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CampaignRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<campaign_entity::Model> for Campaign {
    fn from(model: campaign_entity::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            name: model.name,
            subject: model.subject,
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl CampaignRepository for CampaignRepositoryImpl {
    async fn find_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> Result<Option<Campaign>, RepositoryError> {
        let model = campaign_entity::Entity::find()
            .filter(campaign_entity::Column::OrganizationId.eq(organization_id))
            .filter(campaign_entity::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, campaign: &Campaign) -> Result<Campaign, RepositoryError> {
        let active = campaign_entity::ActiveModel {
            id: Set(campaign.id),
            organization_id: Set(campaign.organization_id),
            name: Set(campaign.name.clone()),
            subject: Set(campaign.subject.clone()),
            body: Set(campaign.body.clone()),
            created_at: Set(campaign.created_at),
            updated_at: Set(campaign.updated_at),
        };

        active.insert(self.db.as_ref()).await?;
        Ok(campaign.clone())
    }
}
