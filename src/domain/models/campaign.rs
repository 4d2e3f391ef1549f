// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 外联活动模板实体
///
/// 每个任务首次执行 GENERATE_CAMPAIGN 时按名称幂等创建；
/// 幂等性依赖 (组织, 名称) 查找而非唯一约束。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// 活动唯一标识符
    pub id: Uuid,
    /// 所属组织ID
    pub organization_id: Uuid,
    /// 活动名称
    pub name: String,
    /// 邮件主题模板
    pub subject: String,
    /// 邮件正文模板
    pub body: String,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl Campaign {
    /// 创建一个新的外联活动
    pub fn new(organization_id: Uuid, name: String, subject: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name,
            subject,
            body,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}
