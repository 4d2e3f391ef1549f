// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::mission::EnrichmentLevel;

/// 流水线工作单元实体
///
/// 表示任务流水线中的一个待处理步骤：生成外联活动、搜索、
/// 丰富化或外联入队。单元具有状态机与类型化载荷；离开
/// pending 后成为单一所有者的终态记录，任何组件不得再改写
/// completed 或 failed 单元。
#[derive(Debug, Clone)]
pub struct AgentTask {
    /// 单元唯一标识符
    pub id: Uuid,
    /// 所属任务ID
    pub mission_id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 单元类型，持久化标签，与载荷变体一致
    pub task_type: TaskType,
    /// 单元状态
    pub status: TaskStatus,
    /// 类型化载荷
    pub payload: TaskPayload,
    /// 成功结果（完成时设置）
    pub result: Option<serde_json::Value>,
    /// 错误消息（失败时设置）
    pub error_message: Option<String>,
    /// 开始处理时间
    pub started_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 单元类型枚举
///
/// contact_initial 与 contact 共享载荷与处理逻辑，仅保留
/// 不同的持久化标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// 生成外联活动
    GenerateCampaign,
    /// 线索搜索
    Search,
    /// 线索丰富化
    Enrich,
    /// 外联入队
    Contact,
    /// 首次外联入队
    ContactInitial,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskType::GenerateCampaign => write!(f, "generate_campaign"),
            TaskType::Search => write!(f, "search"),
            TaskType::Enrich => write!(f, "enrich"),
            TaskType::Contact => write!(f, "contact"),
            TaskType::ContactInitial => write!(f, "contact_initial"),
        }
    }
}

impl FromStr for TaskType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generate_campaign" => Ok(TaskType::GenerateCampaign),
            "search" => Ok(TaskType::Search),
            "enrich" => Ok(TaskType::Enrich),
            "contact" => Ok(TaskType::Contact),
            "contact_initial" => Ok(TaskType::ContactInitial),
            _ => Err(()),
        }
    }
}

/// 单元状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Processing → Completed/Failed
///
/// Completed 与 Failed 为终态；失败单元不会自动重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 待处理，单元已创建但尚未开始执行
    #[default]
    Pending,
    /// 处理中，单元正在被执行
    Processing,
    /// 已完成，单元成功执行完成（包括配额跳过结果）
    Completed,
    /// 已失败，处理器抛出错误
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "processing" => Ok(TaskStatus::Processing),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 载荷中携带的线索引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRef {
    /// 线索ID
    pub id: Uuid,
    /// 姓名
    pub full_name: String,
    /// 职位
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 公司名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// 邮箱
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// LinkedIn链接
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

/// 搜索/生成外联活动单元的定向载荷
///
/// 两种单元类型共享全量定向字段；调优引擎对 pending 单元的
/// 投影也整体覆盖这组字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetingPayload {
    /// 任务标题
    pub mission_title: Option<String>,
    /// 目标职位
    pub job_title: Option<String>,
    /// 目标地区
    pub location: Option<String>,
    /// 目标行业
    pub industry: Option<String>,
    /// 关键词
    pub keywords: Option<String>,
    /// 公司规模筛选
    pub company_size: Option<String>,
    /// 职级筛选集合
    pub seniority: Vec<String>,
    /// 丰富化深度
    pub enrichment_level: Option<EnrichmentLevel>,
    /// 目标外联活动名称
    pub campaign_name: Option<String>,
    /// 外联活动补充语境
    pub campaign_context: Option<String>,
    /// 发起请求的用户，用于标记入库线索
    pub requested_by: Option<Uuid>,
}

/// 丰富化单元载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichPayload {
    /// 候选线索，最多10条
    pub leads: Vec<LeadRef>,
    /// 丰富化深度，决定配额档位
    pub enrichment_level: EnrichmentLevel,
    /// 目标外联活动名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
}

/// 外联单元载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    /// 已丰富化的线索
    pub leads: Vec<LeadRef>,
    /// 目标外联活动名称
    pub campaign_name: String,
}

/// 类型化单元载荷
///
/// 以单元类型为标签的和类型；调度器在变体上做模式匹配，
/// 而不是对字符串字段分支。
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPayload {
    /// 生成外联活动
    GenerateCampaign(TargetingPayload),
    /// 线索搜索
    Search(TargetingPayload),
    /// 线索丰富化
    Enrich(EnrichPayload),
    /// 外联入队（contact 与 contact_initial 共用）
    Contact(ContactPayload),
}

impl TaskPayload {
    /// 载荷变体对应的单元类型
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskPayload::GenerateCampaign(_) => TaskType::GenerateCampaign,
            TaskPayload::Search(_) => TaskType::Search,
            TaskPayload::Enrich(_) => TaskType::Enrich,
            TaskPayload::Contact(_) => TaskType::Contact,
        }
    }

    /// 从持久化标签与JSON列还原载荷
    pub fn from_value(
        task_type: TaskType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match task_type {
            TaskType::GenerateCampaign => {
                serde_json::from_value(value).map(TaskPayload::GenerateCampaign)
            }
            TaskType::Search => serde_json::from_value(value).map(TaskPayload::Search),
            TaskType::Enrich => serde_json::from_value(value).map(TaskPayload::Enrich),
            TaskType::Contact | TaskType::ContactInitial => {
                serde_json::from_value(value).map(TaskPayload::Contact)
            }
        }
    }

    /// 序列化为JSON列内容
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            TaskPayload::GenerateCampaign(p) => serde_json::to_value(p),
            TaskPayload::Search(p) => serde_json::to_value(p),
            TaskPayload::Enrich(p) => serde_json::to_value(p),
            TaskPayload::Contact(p) => serde_json::to_value(p),
        }
        .unwrap_or(serde_json::Value::Null)
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AgentTask {
    /// 创建一个新的工作单元
    ///
    /// # 参数
    ///
    /// * `mission_id` - 所属任务ID
    /// * `organization_id` - 所属组织ID
    /// * `payload` - 类型化载荷，单元类型由载荷变体导出
    pub fn new(mission_id: Uuid, organization_id: Uuid, payload: TaskPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            mission_id,
            organization_id,
            task_type: payload.task_type(),
            status: TaskStatus::Pending,
            payload,
            result: None,
            error_message: None,
            started_at: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    /// 创建保留 contact_initial 标签的外联单元
    pub fn new_with_type(
        mission_id: Uuid,
        organization_id: Uuid,
        task_type: TaskType,
        payload: TaskPayload,
    ) -> Self {
        let mut task = Self::new(mission_id, organization_id, payload);
        task.task_type = task_type;
        task
    }

    /// 启动单元
    ///
    /// 将单元状态从 Pending 变更为 Processing
    pub fn start(mut self) -> Result<Self, DomainError> {
        match self.status {
            TaskStatus::Pending => {
                self.status = TaskStatus::Processing;
                self.started_at = Some(Utc::now().into());
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 完成单元
    ///
    /// 将单元状态从 Processing 变更为 Completed，并记录结果
    pub fn complete(mut self, result: serde_json::Value) -> Result<Self, DomainError> {
        match self.status {
            TaskStatus::Processing => {
                self.status = TaskStatus::Completed;
                self.result = Some(result);
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 标记单元失败
    ///
    /// 将单元状态从 Processing 变更为 Failed，并原样保留错误文本
    pub fn fail(mut self, error_message: String) -> Result<Self, DomainError> {
        match self.status {
            TaskStatus::Processing => {
                self.status = TaskStatus::Failed;
                self.error_message = Some(error_message);
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 判断单元是否处于终态
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TaskStatus::Completed | TaskStatus::Failed)
    }
}
