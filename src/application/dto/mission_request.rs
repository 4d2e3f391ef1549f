// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 任务创建请求
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionRequestDto {
    pub organization_id: Uuid,
    pub owner_id: Uuid,
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    pub goal: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub keywords: Option<String>,
    pub company_size: Option<String>,
    #[serde(default)]
    pub seniority: Vec<String>,
    pub enrichment_level: Option<String>, // "basic" | "deep"
    pub campaign_name: Option<String>,
    pub campaign_context: Option<String>,
    #[serde(default)]
    pub auto_campaign: bool,
    #[validate(range(min = 1, max = 5))]
    pub daily_search_limit: Option<i32>,
    #[validate(range(min = 1, max = 50))]
    pub daily_enrich_limit: Option<i32>,
    #[validate(range(min = 1, max = 50))]
    pub daily_investigate_limit: Option<i32>,
    #[validate(range(min = 1, max = 50))]
    pub daily_contact_limit: Option<i32>,
}

/// 任务创建响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionResponseDto {
    pub mission_id: Uuid,
    pub seeded_task_id: Uuid,
    pub seeded_task_type: String,
}
