// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::activity::{ActivityEntry, LeadEventKind};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// 活动日志仓库特质
///
/// 日志为追加写入；不提供更新或删除接口
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// 追加一条日志
    async fn append(&self, entry: &ActivityEntry) -> Result<(), RepositoryError>;
    /// 统计任务在给定时间之后的线索级事件数
    ///
    /// # 参数
    ///
    /// * `outcome` - 为 Some 时按结果过滤，为 None 时统计全部结果
    async fn count_events(
        &self,
        mission_id: Uuid,
        event_type: LeadEventKind,
        outcome: Option<&str>,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError>;
}
