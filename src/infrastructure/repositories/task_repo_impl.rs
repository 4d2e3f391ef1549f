// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::task::{AgentTask, TaskPayload, TaskStatus, TaskType};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::agent_task as task_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 工作单元仓库实现
///
/// 基于SeaORM实现的工作单元数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的工作单元仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 从持久化行还原领域单元
///
/// 载荷按 task_type 标签解码为类型化变体；解码失败视为损坏记录
fn to_domain(model: task_entity::Model) -> Result<AgentTask, RepositoryError> {
    let task_type: TaskType = model
        .task_type
        .parse()
        .map_err(|_| RepositoryError::Corrupt(format!("unknown task type '{}'", model.task_type)))?;
    let payload = TaskPayload::from_value(task_type, model.payload)
        .map_err(|e| RepositoryError::Corrupt(format!("payload decode failed: {}", e)))?;

    Ok(AgentTask {
        id: model.id,
        mission_id: model.mission_id,
        organization_id: model.organization_id,
        task_type,
        status: model.status.parse().unwrap_or_default(),
        payload,
        result: model.result,
        error_message: model.error_message,
        started_at: model.started_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl From<&AgentTask> for task_entity::ActiveModel {
    fn from(task: &AgentTask) -> Self {
        Self {
            id: Set(task.id),
            mission_id: Set(task.mission_id),
            organization_id: Set(task.organization_id),
            task_type: Set(task.task_type.to_string()),
            status: Set(task.status.to_string()),
            payload: Set(task.payload.to_value()),
            result: Set(task.result.clone()),
            error_message: Set(task.error_message.clone()),
            started_at: Set(task.started_at),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, task: &AgentTask) -> Result<AgentTask, RepositoryError> {
        let model: task_entity::ActiveModel = task.into();

        model.insert(self.db.as_ref()).await?;
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AgentTask>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        model.map(to_domain).transpose()
    }

    async fn fetch_pending(&self, limit: u64) -> Result<Vec<AgentTask>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Status.eq(TaskStatus::Pending.to_string()))
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        let mut tasks = Vec::with_capacity(models.len());
        for model in models {
            let id = model.id;
            match to_domain(model) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    // 损坏的行单独隔离为失败，不拖垮整批
                    warn!("quarantining corrupt pending task {}: {}", id, e);
                    self.mark_failed(id, &e.to_string()).await?;
                }
            }
        }

        Ok(tasks)
    }

    async fn mark_processing(
        &self,
        id: Uuid,
        started_at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = model.into();
        active.status = Set(TaskStatus::Processing.to_string());
        active.started_at = Set(Some(started_at));
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        result: serde_json::Value,
    ) -> Result<(), RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = model.into();
        active.status = Set(TaskStatus::Completed.to_string());
        active.result = Set(Some(result));
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error_message: &str) -> Result<(), RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = model.into();
        active.status = Set(TaskStatus::Failed.to_string());
        active.error_message = Set(Some(error_message.to_string()));
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn find_pending_by_mission(
        &self,
        mission_id: Uuid,
        task_types: &[TaskType],
    ) -> Result<Vec<AgentTask>, RepositoryError> {
        let type_names: Vec<String> = task_types.iter().map(|t| t.to_string()).collect();

        let models = task_entity::Entity::find()
            .filter(task_entity::Column::MissionId.eq(mission_id))
            .filter(task_entity::Column::Status.eq(TaskStatus::Pending.to_string()))
            .filter(task_entity::Column::TaskType.is_in(type_names))
            .all(self.db.as_ref())
            .await?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update_payload_if_pending(
        &self,
        id: Uuid,
        payload: &TaskPayload,
    ) -> Result<bool, RepositoryError> {
        // 仅改写仍处于 pending 的行；与取件并发时以状态过滤为准
        let result = task_entity::Entity::update_many()
            .col_expr(task_entity::Column::Payload, Expr::value(payload.to_value()))
            .col_expr(
                task_entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(task_entity::Column::Id.eq(id))
            .filter(task_entity::Column::Status.eq(TaskStatus::Pending.to_string()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn count_completed_since(
        &self,
        mission_id: Uuid,
        task_type: TaskType,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError> {
        let count = task_entity::Entity::find()
            .filter(task_entity::Column::MissionId.eq(mission_id))
            .filter(task_entity::Column::TaskType.eq(task_type.to_string()))
            .filter(task_entity::Column::Status.eq(TaskStatus::Completed.to_string()))
            .filter(task_entity::Column::UpdatedAt.gte(since))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}
