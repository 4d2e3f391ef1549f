// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mission::{Mission, MissionParams};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 任务（探查目标）仓库特质
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, mission: &Mission) -> Result<Mission, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, RepositoryError>;
    /// 持久化参数集
    ///
    /// 参数集写入 params 列，四个每日上限同时提升为一级列
    async fn update_params(
        &self,
        id: Uuid,
        params: &MissionParams,
    ) -> Result<Mission, RepositoryError>;
}
