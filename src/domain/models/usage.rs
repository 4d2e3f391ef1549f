// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 每日用量账本条目
///
/// 每个（组织，日历日）一行，四个互相独立的计数器。
/// 只增不减；首次读取新的一天时惰性创建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUsage {
    /// 条目唯一标识符
    pub id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// ISO日期
    pub usage_date: NaiveDate,
    /// 当日搜索到的线索数
    pub leads_searched: i32,
    /// 当日基础丰富化的线索数
    pub leads_enriched: i32,
    /// 当日深度调查的线索数
    pub leads_investigated: i32,
    /// 当日搜索调用次数
    pub search_runs: i32,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl DailyUsage {
    /// 创建一个计数全为零的新账本条目
    pub fn new(organization_id: Uuid, usage_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            usage_date,
            leads_searched: 0,
            leads_enriched: 0,
            leads_investigated: 0,
            search_runs: 0,
            updated_at: Utc::now().into(),
        }
    }

    /// 读取指定资源的当前计数
    pub fn count(&self, kind: UsageKind) -> i32 {
        match kind {
            UsageKind::LeadsSearched => self.leads_searched,
            UsageKind::LeadsEnriched => self.leads_enriched,
            UsageKind::LeadsInvestigated => self.leads_investigated,
            UsageKind::SearchRuns => self.search_runs,
        }
    }
}

/// 配额资源种类枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    /// 搜索到的线索数
    LeadsSearched,
    /// 基础丰富化的线索数
    LeadsEnriched,
    /// 深度调查的线索数
    LeadsInvestigated,
    /// 搜索调用次数
    SearchRuns,
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UsageKind::LeadsSearched => write!(f, "leads_searched"),
            UsageKind::LeadsEnriched => write!(f, "leads_enriched"),
            UsageKind::LeadsInvestigated => write!(f, "leads_investigated"),
            UsageKind::SearchRuns => write!(f, "search_runs"),
        }
    }
}
