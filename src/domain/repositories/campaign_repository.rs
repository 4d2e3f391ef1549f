// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::campaign::Campaign;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 外联活动仓库特质
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// 按（组织，名称）查找活动
    async fn find_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> Result<Option<Campaign>, RepositoryError>;
    /// 创建新活动
    async fn create(&self, campaign: &Campaign) -> Result<Campaign, RepositoryError>;
}
