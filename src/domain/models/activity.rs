// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 活动日志条目
///
/// 追加写入、写入后不可变。既承载单元结果记录（details），
/// 也承载供调优引擎统计的线索级事件（event_type/outcome）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// 条目唯一标识符
    pub id: Uuid,
    /// 相关任务ID
    pub mission_id: Option<Uuid>,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 严重级别
    pub level: ActivityLevel,
    /// 消息
    pub message: String,
    /// 结构化详情
    pub details: Option<serde_json::Value>,
    /// 线索级事件类型
    pub event_type: Option<LeadEventKind>,
    /// 线索级事件结果
    pub outcome: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

impl ActivityEntry {
    /// 创建一条单元结果记录
    pub fn unit_outcome(
        mission_id: Uuid,
        organization_id: Uuid,
        level: ActivityLevel,
        message: String,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mission_id: Some(mission_id),
            organization_id,
            level,
            message,
            details: Some(details),
            event_type: None,
            outcome: None,
            created_at: Utc::now().into(),
        }
    }

    /// 创建一条线索级事件记录
    pub fn lead_event(
        mission_id: Uuid,
        organization_id: Uuid,
        event_type: LeadEventKind,
        outcome: &str,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mission_id: Some(mission_id),
            organization_id,
            level: ActivityLevel::Info,
            message: format!("{} {}", event_type, outcome),
            details,
            event_type: Some(event_type),
            outcome: Some(outcome.to_string()),
            created_at: Utc::now().into(),
        }
    }
}

/// 活动严重级别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// 信息
    #[default]
    Info,
    /// 成功
    Success,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActivityLevel::Info => write!(f, "info"),
            ActivityLevel::Success => write!(f, "success"),
            ActivityLevel::Warn => write!(f, "warn"),
            ActivityLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(ActivityLevel::Info),
            "success" => Ok(ActivityLevel::Success),
            "warn" => Ok(ActivityLevel::Warn),
            "error" => Ok(ActivityLevel::Error),
            _ => Err(()),
        }
    }
}

/// 线索级事件类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadEventKind {
    /// 搜索命中一条线索
    LeadFound,
    /// 丰富化产出（outcome: email_found / no_email）
    LeadEnriched,
    /// 深度调查完成（outcome: completed）
    LeadInvestigated,
    /// 外联（outcome: queued / sent / failed / blocked）
    LeadContacted,
}

impl fmt::Display for LeadEventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeadEventKind::LeadFound => write!(f, "lead_found"),
            LeadEventKind::LeadEnriched => write!(f, "lead_enriched"),
            LeadEventKind::LeadInvestigated => write!(f, "lead_investigated"),
            LeadEventKind::LeadContacted => write!(f, "lead_contacted"),
        }
    }
}

impl FromStr for LeadEventKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead_found" => Ok(LeadEventKind::LeadFound),
            "lead_enriched" => Ok(LeadEventKind::LeadEnriched),
            "lead_investigated" => Ok(LeadEventKind::LeadInvestigated),
            "lead_contacted" => Ok(LeadEventKind::LeadContacted),
            _ => Err(()),
        }
    }
}

/// 丰富化事件结果：找到邮箱
pub const OUTCOME_EMAIL_FOUND: &str = "email_found";
/// 丰富化事件结果：未找到邮箱
pub const OUTCOME_NO_EMAIL: &str = "no_email";
/// 调查事件结果：已完成
pub const OUTCOME_COMPLETED: &str = "completed";
/// 外联事件结果：已入队
pub const OUTCOME_QUEUED: &str = "queued";
/// 外联事件结果：已发送
pub const OUTCOME_SENT: &str = "sent";
/// 外联事件结果：发送失败
pub const OUTCOME_FAILED: &str = "failed";
/// 外联事件结果：被拦截
pub const OUTCOME_BLOCKED: &str = "blocked";
