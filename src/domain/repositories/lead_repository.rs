// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lead::Lead;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 丰富化写回内容
#[derive(Debug, Clone)]
pub struct LeadEnrichmentUpdate {
    /// 线索ID
    pub lead_id: Uuid,
    /// 揭示到的邮箱
    pub email: Option<String>,
    /// 修正后的职位
    pub title: Option<String>,
    /// 修正后的公司名称
    pub company_name: Option<String>,
    /// 修正后的LinkedIn链接
    pub linkedin_url: Option<String>,
}

/// 线索仓库特质
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// 批量入库新线索
    async fn insert_many(&self, leads: &[Lead]) -> Result<Vec<Lead>, RepositoryError>;
    /// 根据ID查找线索
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, RepositoryError>;
    /// 写回丰富化结果并将线索置为 enriched
    async fn apply_enrichment(
        &self,
        updates: &[LeadEnrichmentUpdate],
    ) -> Result<(), RepositoryError>;
    /// 将线索置为 contacted
    async fn mark_contacted(&self, lead_ids: &[Uuid]) -> Result<(), RepositoryError>;
    /// 统计组织内等待丰富化的线索数
    async fn count_queued(&self, organization_id: Uuid) -> Result<u64, RepositoryError>;
    /// 统计组织内已丰富化、有邮箱且尚未外联的线索数
    async fn count_enriched_with_email(
        &self,
        organization_id: Uuid,
    ) -> Result<u64, RepositoryError>;
    /// 统计组织内被标记为禁止外联的线索数
    async fn count_do_not_contact(&self, organization_id: Uuid) -> Result<u64, RepositoryError>;
}
