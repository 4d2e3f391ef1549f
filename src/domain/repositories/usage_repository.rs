// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::usage::{DailyUsage, UsageKind};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 每日用量账本仓库特质
///
/// 计数器只增不减。递增走条件更新：单条UPDATE语句仅在新总量
/// 不超过上限时生效，并报告是否生效，避免读后写竞争超限。
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// 读取指定组织当日账本，不存在时创建零值行
    async fn get_or_create(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
    ) -> Result<DailyUsage, RepositoryError>;

    /// 条件递增单个计数器
    ///
    /// # 参数
    ///
    /// * `kind` - 资源种类
    /// * `amount` - 递增量
    /// * `limit` - 当日上限；递增仅在 count + amount <= limit 时生效
    ///
    /// # 返回值
    ///
    /// 返回递增是否生效
    async fn try_consume(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
        kind: UsageKind,
        amount: i32,
        limit: i32,
    ) -> Result<bool, RepositoryError>;

    /// 记录一次搜索调用
    ///
    /// 单条语句同时递增 search_runs（+1）与 leads_searched（+found），
    /// 仅在 search_runs < limit 时生效
    async fn record_search(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
        leads_found: i32,
        search_run_limit: i32,
    ) -> Result<bool, RepositoryError>;
}
