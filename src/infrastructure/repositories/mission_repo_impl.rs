// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::mission::{Mission, MissionParams};
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::mission as mission_entity;

/// 任务（探查目标）仓库实现
#[derive(Clone)]
pub struct MissionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MissionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: mission_entity::Model) -> Result<Mission, RepositoryError> {
    let params: MissionParams = serde_json::from_value(model.params)
        .map_err(|e| RepositoryError::Corrupt(format!("mission params decode failed: {}", e)))?;

    Ok(Mission {
        id: model.id,
        organization_id: model.organization_id,
        owner_id: model.owner_id,
        title: model.title,
        goal: model.goal,
        status: model.status.parse().unwrap_or_default(),
        params,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn to_active(mission: &Mission) -> Result<mission_entity::ActiveModel, RepositoryError> {
    let params = serde_json::to_value(&mission.params)
        .map_err(|e| RepositoryError::Corrupt(format!("mission params encode failed: {}", e)))?;

    Ok(mission_entity::ActiveModel {
        id: Set(mission.id),
        organization_id: Set(mission.organization_id),
        owner_id: Set(mission.owner_id),
        title: Set(mission.title.clone()),
        goal: Set(mission.goal.clone()),
        status: Set(mission.status.to_string()),
        params: Set(params),
        daily_search_limit: Set(mission.params.search_limit()),
        daily_enrich_limit: Set(mission.params.enrich_limit()),
        daily_investigate_limit: Set(mission.params.investigate_limit()),
        daily_contact_limit: Set(mission.params.contact_limit()),
        created_at: Set(mission.created_at),
        updated_at: Set(mission.updated_at),
    })
}

#[async_trait]
impl MissionRepository for MissionRepositoryImpl {
    async fn create(&self, mission: &Mission) -> Result<Mission, RepositoryError> {
        let active = to_active(mission)?;
        active.insert(self.db.as_ref()).await?;
        Ok(mission.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, RepositoryError> {
        let model = mission_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        model.map(to_domain).transpose()
    }

    async fn update_params(
        &self,
        id: Uuid,
        params: &MissionParams,
    ) -> Result<Mission, RepositoryError> {
        let model = mission_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let encoded = serde_json::to_value(params)
            .map_err(|e| RepositoryError::Corrupt(format!("mission params encode failed: {}", e)))?;

        let mut active: mission_entity::ActiveModel = model.into();
        active.params = Set(encoded);
        // 四个每日上限同步提升为一级列
        active.daily_search_limit = Set(params.search_limit());
        active.daily_enrich_limit = Set(params.enrich_limit());
        active.daily_investigate_limit = Set(params.investigate_limit());
        active.daily_contact_limit = Set(params.contact_limit());
        active.updated_at = Set(Utc::now().fixed_offset());

        let updated = active.update(self.db.as_ref()).await?;
        to_domain(updated)
    }
}
