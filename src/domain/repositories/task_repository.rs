// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{AgentTask, TaskPayload, TaskType};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 记录内容损坏
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// 工作单元仓库特质
///
/// 定义流水线工作单元的数据访问接口
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建新单元
    async fn create(&self, task: &AgentTask) -> Result<AgentTask, RepositoryError>;
    /// 根据ID查找单元
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AgentTask>, RepositoryError>;
    /// 获取一批待处理单元（顺序不作保证）
    async fn fetch_pending(&self, limit: u64) -> Result<Vec<AgentTask>, RepositoryError>;
    /// 标记单元进入处理中并记录开始时间
    async fn mark_processing(
        &self,
        id: Uuid,
        started_at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError>;
    /// 标记单元已完成并记录结果
    async fn mark_completed(
        &self,
        id: Uuid,
        result: serde_json::Value,
    ) -> Result<(), RepositoryError>;
    /// 标记单元已失败并原样保留错误文本
    async fn mark_failed(&self, id: Uuid, error_message: &str) -> Result<(), RepositoryError>;
    /// 查找任务下仍处于 pending 且类型在给定集合内的单元
    async fn find_pending_by_mission(
        &self,
        mission_id: Uuid,
        task_types: &[TaskType],
    ) -> Result<Vec<AgentTask>, RepositoryError>;
    /// 仅当单元仍处于 pending 时改写其载荷
    ///
    /// # 返回值
    ///
    /// 返回载荷是否被实际改写（单元并发离开 pending 时为 false）
    async fn update_payload_if_pending(
        &self,
        id: Uuid,
        payload: &TaskPayload,
    ) -> Result<bool, RepositoryError>;
    /// 统计任务下指定类型、给定时间之后完成的单元数
    async fn count_completed_since(
        &self,
        mission_id: Uuid,
        task_type: TaskType,
        since: DateTime<FixedOffset>,
    ) -> Result<u64, RepositoryError>;
}
