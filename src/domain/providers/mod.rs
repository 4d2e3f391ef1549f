// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 供应商错误类型
#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Provider returned status {status}: {message}")]
    UpstreamError { status: u16, message: String },
    #[error("Response decode error: {0}")]
    DecodeError(String),
}

/// 线索搜索请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSearchRequest {
    /// 目标职位集合
    pub job_titles: Vec<String>,
    /// 目标地区集合
    pub locations: Vec<String>,
    /// 目标行业集合
    pub industries: Vec<String>,
    /// 关键词
    pub keywords: String,
    /// 结果数上限
    pub limit: u32,
}

/// 搜索命中的线索
#[derive(Debug, Clone, Deserialize)]
pub struct FoundLead {
    /// 姓名（上游字段名不统一，兼容 full_name 与 name）
    #[serde(alias = "name")]
    pub full_name: String,
    /// 职位
    #[serde(default)]
    pub title: Option<String>,
    /// 公司名称（兼容 organization_name 与 company_name）
    #[serde(default, alias = "company_name")]
    pub organization_name: Option<String>,
    /// 邮箱
    #[serde(default)]
    pub email: Option<String>,
    /// LinkedIn链接
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// 线索搜索供应商特质
#[async_trait]
pub trait LeadSearchProvider: Send + Sync {
    /// 执行一次线索搜索
    async fn search(&self, request: &LeadSearchRequest) -> Result<Vec<FoundLead>, ProviderError>;

    /// 供应商名称
    fn name(&self) -> &'static str;
}

/// 丰富化候选线索
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentCandidate {
    /// 线索ID
    pub id: Uuid,
    /// 姓名
    pub full_name: String,
    /// LinkedIn链接
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// 公司名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// 职位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 已知邮箱
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 丰富化请求
#[derive(Debug, Clone)]
pub struct EnrichmentRequest {
    /// 候选线索批次
    pub leads: Vec<EnrichmentCandidate>,
    /// 是否揭示邮箱
    pub reveal_email: bool,
    /// 是否揭示电话（仅深度档）
    pub reveal_phone: bool,
    /// 发起请求的用户，作为鉴权标识头传给上游
    pub requested_by: Uuid,
}

/// 丰富化产出的线索
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLead {
    /// 线索ID
    pub id: Uuid,
    /// 姓名
    pub full_name: String,
    /// LinkedIn链接
    #[serde(default)]
    pub linkedin_url: Option<String>,
    /// 公司名称
    #[serde(default)]
    pub company_name: Option<String>,
    /// 职位
    #[serde(default)]
    pub title: Option<String>,
    /// 揭示到的邮箱
    #[serde(default)]
    pub email: Option<String>,
}

/// 丰富化供应商特质
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// 对一批候选线索执行丰富化
    async fn enrich(&self, request: &EnrichmentRequest) -> Result<Vec<EnrichedLead>, ProviderError>;

    /// 供应商名称
    fn name(&self) -> &'static str;
}
