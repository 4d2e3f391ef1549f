// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lead::ContactedLead;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// 外联入队记录仓库特质
#[async_trait]
pub trait ContactedLeadRepository: Send + Sync {
    /// 批量写入外联记录
    async fn insert_many(&self, records: &[ContactedLead]) -> Result<(), RepositoryError>;
    /// 统计组织在给定时间之后创建的外联记录数
    async fn count_created_since(
        &self,
        organization_id: Uuid,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError>;
    /// 统计任务在给定时间之后创建的外联记录数
    async fn count_created_since_by_mission(
        &self,
        mission_id: Uuid,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError>;
}
