// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 每日搜索次数默认上限
pub const DEFAULT_DAILY_SEARCH_LIMIT: i32 = 3;
/// 每日基础丰富化线索数默认上限
pub const DEFAULT_DAILY_ENRICH_LIMIT: i32 = 50;
/// 每日深度调查线索数默认上限
pub const DEFAULT_DAILY_INVESTIGATE_LIMIT: i32 = 20;
/// 每日外联数默认上限
pub const DEFAULT_DAILY_CONTACT_LIMIT: i32 = 25;

/// 任务实体（探查目标）
///
/// 表示一个组织持有的、可配置的常设探查目标。流水线的每个
/// 工作单元都归属于一个任务；调优引擎可以改写其参数集。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 创建者用户ID
    pub owner_id: Uuid,
    /// 任务标题
    pub title: String,
    /// 目标描述
    pub goal: Option<String>,
    /// 任务状态
    pub status: MissionStatus,
    /// 结构化参数集
    pub params: MissionParams,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl Mission {
    /// 创建一个新的任务
    pub fn new(
        organization_id: Uuid,
        owner_id: Uuid,
        title: String,
        goal: Option<String>,
        params: MissionParams,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            owner_id,
            title,
            goal,
            status: MissionStatus::Active,
            params,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}

/// 任务状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// 活跃中
    #[default]
    Active,
    /// 已暂停
    Paused,
    /// 已完成
    Completed,
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MissionStatus::Active => write!(f, "active"),
            MissionStatus::Paused => write!(f, "paused"),
            MissionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for MissionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MissionStatus::Active),
            "paused" => Ok(MissionStatus::Paused),
            "completed" => Ok(MissionStatus::Completed),
            _ => Err(()),
        }
    }
}

/// 丰富化深度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentLevel {
    /// 基础档：仅邮箱
    Basic,
    /// 深度档：邮箱加电话
    Deep,
}

impl fmt::Display for EnrichmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnrichmentLevel::Basic => write!(f, "basic"),
            EnrichmentLevel::Deep => write!(f, "deep"),
        }
    }
}

impl EnrichmentLevel {
    /// 将任意输入宽松归一化为合法深度
    ///
    /// 非 "deep" 的值一律归为 Basic
    pub fn coerce(value: &str) -> Self {
        if value.eq_ignore_ascii_case("deep") {
            EnrichmentLevel::Deep
        } else {
            EnrichmentLevel::Basic
        }
    }
}

/// 任务结构化参数集
///
/// 由操作员界面与调优引擎共同维护；流水线工作单元的载荷
/// 从这里投影而来。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MissionParams {
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
    /// 是否自动生成外联活动
    pub auto_campaign: bool,
    /// 每日搜索次数上限
    pub daily_search_limit: Option<i32>,
    /// 每日基础丰富化上限
    pub daily_enrich_limit: Option<i32>,
    /// 每日深度调查上限
    pub daily_investigate_limit: Option<i32>,
    /// 每日外联上限
    pub daily_contact_limit: Option<i32>,
}

impl MissionParams {
    /// 每日搜索次数上限（未配置时取默认值）
    pub fn search_limit(&self) -> i32 {
        self.daily_search_limit
            .unwrap_or(DEFAULT_DAILY_SEARCH_LIMIT)
    }

    /// 每日基础丰富化上限（未配置时取默认值）
    pub fn enrich_limit(&self) -> i32 {
        self.daily_enrich_limit
            .unwrap_or(DEFAULT_DAILY_ENRICH_LIMIT)
    }

    /// 每日深度调查上限（未配置时取默认值）
    pub fn investigate_limit(&self) -> i32 {
        self.daily_investigate_limit
            .unwrap_or(DEFAULT_DAILY_INVESTIGATE_LIMIT)
    }

    /// 每日外联上限（未配置时取默认值）
    pub fn contact_limit(&self) -> i32 {
        self.daily_contact_limit
            .unwrap_or(DEFAULT_DAILY_CONTACT_LIMIT)
    }
}

/// 归一化职级集合
///
/// 去除空白项并按首次出现顺序去重
pub fn normalize_seniority<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim().to_lowercase();
        if !trimmed.is_empty() && !seen.contains(&trimmed) {
            seen.push(trimmed);
        }
    }
    seen
}
