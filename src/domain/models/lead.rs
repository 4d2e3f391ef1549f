// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 外联记录使用的固定投递渠道标签
pub const CONTACT_PROVIDER: &str = "outreach_api";

/// 线索实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// 线索唯一标识符
    pub id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 来源任务ID
    pub mission_id: Option<Uuid>,
    /// 发起搜索的用户ID
    pub created_by: Uuid,
    /// 姓名
    pub full_name: String,
    /// 职位
    pub title: Option<String>,
    /// 公司名称
    pub company_name: Option<String>,
    /// 邮箱
    pub email: Option<String>,
    /// LinkedIn链接
    pub linkedin_url: Option<String>,
    /// 线索状态
    pub status: LeadStatus,
    /// 禁止外联标记
    pub do_not_contact: bool,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 线索状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// 已入库，等待丰富化
    #[default]
    Queued,
    /// 已丰富化
    Enriched,
    /// 已进入外联队列
    Contacted,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeadStatus::Queued => write!(f, "queued"),
            LeadStatus::Enriched => write!(f, "enriched"),
            LeadStatus::Contacted => write!(f, "contacted"),
        }
    }
}

impl FromStr for LeadStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(LeadStatus::Queued),
            "enriched" => Ok(LeadStatus::Enriched),
            "contacted" => Ok(LeadStatus::Contacted),
            _ => Err(()),
        }
    }
}

impl Lead {
    /// 创建一条待丰富化的新线索
    pub fn new(
        organization_id: Uuid,
        mission_id: Option<Uuid>,
        created_by: Uuid,
        full_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            mission_id,
            created_by,
            full_name,
            title: None,
            company_name: None,
            email: None,
            linkedin_url: None,
            status: LeadStatus::Queued,
            do_not_contact: false,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}

/// 外联入队记录
///
/// 由 CONTACT 处理器物化；消息的实际投递由外部协作方完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactedLead {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 来源任务ID
    pub mission_id: Option<Uuid>,
    /// 外联活动ID
    pub campaign_id: Uuid,
    /// 线索ID
    pub lead_id: Uuid,
    /// 姓名
    pub name: String,
    /// 邮箱
    pub email: String,
    /// 公司
    pub company: Option<String>,
    /// 职位
    pub role: Option<String>,
    /// 记录状态，入队时固定为 queued
    pub status: String,
    /// 投递渠道标签
    pub provider: String,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}
