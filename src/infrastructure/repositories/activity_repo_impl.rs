// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::activity::{ActivityEntry, LeadEventKind};
use crate::domain::repositories::activity_repository::ActivityRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::activity_log;

/// 活动日志仓库实现
#[derive(Clone)]
pub struct ActivityRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ActivityRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for ActivityRepositoryImpl {
    async fn append(&self, entry: &ActivityEntry) -> Result<(), RepositoryError> {
        let active = activity_log::ActiveModel {
            id: Set(entry.id),
            mission_id: Set(entry.mission_id),
            organization_id: Set(entry.organization_id),
            level: Set(entry.level.to_string()),
            message: Set(entry.message.clone()),
            details: Set(entry.details.clone()),
            event_type: Set(entry.event_type.map(|e| e.to_string())),
            outcome: Set(entry.outcome.clone()),
            created_at: Set(entry.created_at),
        };

        active.insert(self.db.as_ref()).await?;
        Ok(())
    }

    async fn count_events(
        &self,
        mission_id: Uuid,
        event_type: LeadEventKind,
        outcome: Option<&str>,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError> {
        let mut query = activity_log::Entity::find()
            .filter(activity_log::Column::MissionId.eq(mission_id))
            .filter(activity_log::Column::EventType.eq(event_type.to_string()))
            .filter(activity_log::Column::CreatedAt.gte(since));

        if let Some(outcome) = outcome {
            query = query.filter(activity_log::Column::Outcome.eq(outcome));
        }

        let count = query.count(self.db.as_ref()).await?;
        Ok(count)
    }
}
