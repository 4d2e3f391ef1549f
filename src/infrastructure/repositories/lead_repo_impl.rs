// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::lead::{Lead, LeadStatus};
use crate::domain::repositories::lead_repository::{LeadEnrichmentUpdate, LeadRepository};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::lead as lead_entity;

/// 线索仓库实现
#[derive(Clone)]
pub struct LeadRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl LeadRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<lead_entity::Model> for Lead {
    fn from(model: lead_entity::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            mission_id: model.mission_id,
            created_by: model.created_by,
            full_name: model.full_name,
            title: model.title,
            company_name: model.company_name,
            email: model.email,
            linkedin_url: model.linkedin_url,
            status: model.status.parse().unwrap_or_default(),
            do_not_contact: model.do_not_contact,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Lead> for lead_entity::ActiveModel {
    fn from(lead: &Lead) -> Self {
        Self {
            id: Set(lead.id),
            organization_id: Set(lead.organization_id),
            mission_id: Set(lead.mission_id),
            created_by: Set(lead.created_by),
            full_name: Set(lead.full_name.clone()),
            title: Set(lead.title.clone()),
            company_name: Set(lead.company_name.clone()),
            email: Set(lead.email.clone()),
            linkedin_url: Set(lead.linkedin_url.clone()),
            status: Set(lead.status.to_string()),
            do_not_contact: Set(lead.do_not_contact),
            created_at: Set(lead.created_at),
            updated_at: Set(lead.updated_at),
        }
    }
}

#[async_trait]
impl LeadRepository for LeadRepositoryImpl {
    async fn insert_many(&self, leads: &[Lead]) -> Result<Vec<Lead>, RepositoryError> {
        if leads.is_empty() {
            return Ok(Vec::new());
        }

        let models: Vec<lead_entity::ActiveModel> = leads.iter().map(Into::into).collect();
        lead_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;

        Ok(leads.to_vec())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, RepositoryError> {
        let model = lead_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn apply_enrichment(
        &self,
        updates: &[LeadEnrichmentUpdate],
    ) -> Result<(), RepositoryError> {
        for update in updates {
            let model = lead_entity::Entity::find_by_id(update.lead_id)
                .one(self.db.as_ref())
                .await?;

            let Some(model) = model else {
                // 供应商可能回传我们未入库的ID，跳过即可
                continue;
            };

            let mut active: lead_entity::ActiveModel = model.into();
            if update.email.is_some() {
                active.email = Set(update.email.clone());
            }
            if update.title.is_some() {
                active.title = Set(update.title.clone());
            }
            if update.company_name.is_some() {
                active.company_name = Set(update.company_name.clone());
            }
            if update.linkedin_url.is_some() {
                active.linkedin_url = Set(update.linkedin_url.clone());
            }
            active.status = Set(LeadStatus::Enriched.to_string());
            active.updated_at = Set(Utc::now().fixed_offset());
            active.update(self.db.as_ref()).await?;
        }

        Ok(())
    }

    async fn mark_contacted(&self, lead_ids: &[Uuid]) -> Result<(), RepositoryError> {
        if lead_ids.is_empty() {
            return Ok(());
        }

        lead_entity::Entity::update_many()
            .col_expr(
                lead_entity::Column::Status,
                Expr::value(LeadStatus::Contacted.to_string()),
            )
            .col_expr(
                lead_entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(lead_entity::Column::Id.is_in(lead_ids.to_vec()))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn count_queued(&self, organization_id: Uuid) -> Result<u64, RepositoryError> {
        let count = lead_entity::Entity::find()
            .filter(lead_entity::Column::OrganizationId.eq(organization_id))
            .filter(lead_entity::Column::Status.eq(LeadStatus::Queued.to_string()))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_enriched_with_email(
        &self,
        organization_id: Uuid,
    ) -> Result<u64, RepositoryError> {
        let count = lead_entity::Entity::find()
            .filter(lead_entity::Column::OrganizationId.eq(organization_id))
            .filter(lead_entity::Column::Status.eq(LeadStatus::Enriched.to_string()))
            .filter(lead_entity::Column::Email.is_not_null())
            .filter(lead_entity::Column::DoNotContact.eq(false))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_do_not_contact(&self, organization_id: Uuid) -> Result<u64, RepositoryError> {
        let count = lead_entity::Entity::find()
            .filter(lead_entity::Column::OrganizationId.eq(organization_id))
            .filter(lead_entity::Column::DoNotContact.eq(true))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}
