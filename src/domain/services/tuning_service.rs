// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::models::activity::{
    ActivityEntry, ActivityLevel, LeadEventKind, OUTCOME_BLOCKED, OUTCOME_COMPLETED,
    OUTCOME_EMAIL_FOUND, OUTCOME_FAILED, OUTCOME_NO_EMAIL, OUTCOME_SENT,
};
use crate::domain::models::mission::{
    normalize_seniority, EnrichmentLevel, Mission, MissionParams,
};
use crate::domain::models::task::{
    AgentTask, ContactPayload, EnrichPayload, TargetingPayload, TaskPayload, TaskType,
};
use crate::domain::repositories::activity_repository::ActivityRepository;
use crate::domain::repositories::contacted_lead_repository::ContactedLeadRepository;
use crate::domain::repositories::lead_repository::LeadRepository;
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};

/// 每日搜索上限的合法区间
const SEARCH_LIMIT_RANGE: (i32, i32) = (1, 5);
/// 其余每日上限的合法区间
const DAILY_LIMIT_RANGE: (i32, i32) = (1, 50);
/// 未配置职级筛选时建议的默认集合
const DEFAULT_SENIORITY: [&str; 4] = ["manager", "director", "vp", "cxo"];

/// 调优服务错误类型
#[derive(Error, Debug)]
pub enum TuningServiceError {
    /// 目标任务不存在
    #[error("Mission {0} not found")]
    MissionNotFound(Uuid),
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 任务的24小时指标快照
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionMetrics {
    /// 24小时内搜索命中的线索数（事件统计）
    pub leads_found_24h: u64,
    /// 24小时内完成的搜索单元数（存储统计）
    pub searches_completed_24h: u64,
    /// 24小时内丰富化找到邮箱的次数
    pub enrich_email_found_24h: u64,
    /// 24小时内丰富化未找到邮箱的次数
    pub enrich_no_email_24h: u64,
    /// 24小时内完成的深度调查数
    pub investigate_completed_24h: u64,
    /// 24小时内外联成功发送数
    pub contacts_sent_24h: u64,
    /// 24小时内外联发送失败数
    pub contact_failures_24h: u64,
    /// 24小时内外联被拦截数
    pub contacts_blocked_24h: u64,
    /// 组织内等待丰富化的线索数
    pub leads_awaiting_enrichment: u64,
    /// 组织内已丰富化、有邮箱且尚未外联的线索数
    pub enriched_awaiting_contact: u64,
    /// 组织内禁止外联的线索数
    pub do_not_contact_leads: u64,
    /// 组织自当日零点以来的外联入队数
    pub org_contacts_today: u64,
    /// 本任务自当日零点以来的外联入队数
    pub mission_contacts_today: u64,
}

/// 职级输入：列表或逗号分隔的字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeniorityInput {
    /// 列表形式
    List(Vec<String>),
    /// 逗号分隔形式
    Csv(String),
}

impl SeniorityInput {
    /// 归一化为去重后的列表
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SeniorityInput::List(values) => normalize_seniority(values.iter()),
            SeniorityInput::Csv(value) => normalize_seniority(value.split(',')),
        }
    }
}

/// 任务参数的部分更新
///
/// 字段缺省表示不动；字符串字段传空串表示清除。校验从不
/// 拒绝：越界值被钳制、非法深度被归一化（可用性优先于严格性）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissionUpdate {
    /// 目标职位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// 目标地区
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// 目标行业
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// 关键词
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// 公司规模筛选（空串清除）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    /// 职级筛选
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<SeniorityInput>,
    /// 丰富化深度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment_level: Option<String>,
    /// 目标外联活动名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    /// 外联活动补充语境
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_context: Option<String>,
    /// 每日搜索次数上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_search_limit: Option<i32>,
    /// 每日基础丰富化上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_enrich_limit: Option<i32>,
    /// 每日深度调查上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_investigate_limit: Option<i32>,
    /// 每日外联上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_contact_limit: Option<i32>,
}

/// 单条调优建议
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// 规则标识
    pub id: &'static str,
    /// 规则标题
    pub title: &'static str,
    /// 依据，内插具体计数
    pub rationale: String,
    /// 置信度
    pub confidence: f64,
    /// 本条规则自己的字段级补丁
    pub patch: MissionUpdate,
}

/// 字段级竞争提案
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProposal {
    /// 提案来源规则
    pub rule_id: &'static str,
    /// 提案值
    pub value: Value,
}

/// 合并建议时的字段冲突
///
/// 同一字段被多条规则提出时不并入合并补丁，而是显式列出
/// 供操作员选择
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConflict {
    /// 冲突字段（线上字段名）
    pub field: String,
    /// 竞争提案列表
    pub proposals: Vec<FieldProposal>,
}

/// 调优读取快照
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningSnapshot {
    /// 任务当前状态
    pub mission: Mission,
    /// 24小时指标
    pub metrics: MissionMetrics,
    /// 逐条建议
    pub recommendations: Vec<Recommendation>,
    /// 合并后的建议补丁（仅无冲突字段）
    pub suggested_patch: MissionUpdate,
    /// 字段冲突列表
    pub conflicts: Vec<FieldConflict>,
    /// 汇总说明
    pub reasoning: String,
}

/// 补丁提交结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningApplyOutcome {
    /// 被改写载荷的 pending 单元数
    pub patched_pending_tasks: u64,
    /// 提交后重新计算的快照
    pub snapshot: TuningSnapshot,
}

/// 将更新合并进参数集并完成字段级校验
///
/// 每日搜索上限钳制到 [1,5]，其余每日上限钳制到 [1,50]，
/// 深度归一化为 basic/deep，职级从列表或逗号分隔串归一化为
/// 去重列表。字符串字段空串表示清除
pub fn apply_update(params: &MissionParams, update: &MissionUpdate) -> MissionParams {
    let mut next = params.clone();

    fn text_field(target: &mut Option<String>, value: &Option<String>) {
        if let Some(value) = value {
            let trimmed = value.trim();
            *target = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
    }

    text_field(&mut next.job_title, &update.job_title);
    text_field(&mut next.location, &update.location);
    text_field(&mut next.industry, &update.industry);
    text_field(&mut next.keywords, &update.keywords);
    text_field(&mut next.company_size, &update.company_size);
    text_field(&mut next.campaign_name, &update.campaign_name);
    text_field(&mut next.campaign_context, &update.campaign_context);

    if let Some(seniority) = &update.seniority {
        next.seniority = seniority.normalize();
    }

    if let Some(level) = &update.enrichment_level {
        next.enrichment_level = Some(EnrichmentLevel::coerce(level));
    }

    if let Some(limit) = update.daily_search_limit {
        next.daily_search_limit = Some(limit.clamp(SEARCH_LIMIT_RANGE.0, SEARCH_LIMIT_RANGE.1));
    }
    if let Some(limit) = update.daily_enrich_limit {
        next.daily_enrich_limit = Some(limit.clamp(DAILY_LIMIT_RANGE.0, DAILY_LIMIT_RANGE.1));
    }
    if let Some(limit) = update.daily_investigate_limit {
        next.daily_investigate_limit =
            Some(limit.clamp(DAILY_LIMIT_RANGE.0, DAILY_LIMIT_RANGE.1));
    }
    if let Some(limit) = update.daily_contact_limit {
        next.daily_contact_limit = Some(limit.clamp(DAILY_LIMIT_RANGE.0, DAILY_LIMIT_RANGE.1));
    }

    next
}

/// 按固定顺序评估推荐规则集
///
/// 每条命中的规则单独给出依据与字段级补丁
pub fn evaluate_rules(params: &MissionParams, metrics: &MissionMetrics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // 规则一：扩大搜索范围——搜索在跑但几乎不出线索
    if metrics.searches_completed_24h >= 1
        && metrics.leads_found_24h <= metrics.searches_completed_24h
    {
        let current = params.search_limit();
        recommendations.push(Recommendation {
            id: "expand_search_scope",
            title: "Expand search scope",
            rationale: format!(
                "{} search run(s) in the last 24h produced only {} lead(s); widening the \
                 filters and allowing one more daily run should lift the yield",
                metrics.searches_completed_24h, metrics.leads_found_24h
            ),
            confidence: 0.82,
            patch: MissionUpdate {
                daily_search_limit: Some((current + 1).min(SEARCH_LIMIT_RANGE.1)),
                // 空串约定：清除过窄的公司规模筛选
                company_size: Some(String::new()),
                ..Default::default()
            },
        });
    }

    // 规则二：提升丰富化质量——大量尝试却挖不到邮箱
    let enrich_attempts = metrics.enrich_email_found_24h + metrics.enrich_no_email_24h;
    if enrich_attempts >= 4
        && metrics.enrich_no_email_24h * 100 >= enrich_attempts * 45
        && params.enrichment_level != Some(EnrichmentLevel::Deep)
    {
        let investigate = params
            .investigate_limit()
            .max(params.enrich_limit())
            .min(DAILY_LIMIT_RANGE.1);
        recommendations.push(Recommendation {
            id: "upgrade_enrichment_quality",
            title: "Upgrade enrichment quality",
            rationale: format!(
                "{} of {} enrichment attempt(s) in the last 24h surfaced no email; deep \
                 enrichment reveals more contact data per lead",
                metrics.enrich_no_email_24h, enrich_attempts
            ),
            confidence: 0.77,
            patch: MissionUpdate {
                enrichment_level: Some(EnrichmentLevel::Deep.to_string()),
                daily_investigate_limit: Some(investigate),
                ..Default::default()
            },
        });
    }

    // 规则三：疏通外联积压——有邮箱的线索超出当日剩余余量
    let contact_limit = params.contact_limit();
    let headroom = (contact_limit as i64 - metrics.mission_contacts_today as i64).max(0);
    let backlog = metrics.enriched_awaiting_contact as i64;
    if backlog > headroom {
        let raise = (backlog - headroom).min(10) as i32;
        recommendations.push(Recommendation {
            id: "unblock_contact_backlog",
            title: "Unblock contact backlog",
            rationale: format!(
                "{} enriched lead(s) with an email are waiting while only {} contact slot(s) \
                 remain today; raising the daily contact cap drains the backlog",
                backlog, headroom
            ),
            confidence: 0.90,
            patch: MissionUpdate {
                daily_contact_limit: Some((contact_limit + raise).min(DAILY_LIMIT_RANGE.1)),
                ..Default::default()
            },
        });
    }

    // 规则四：稳定外联投递——失败偏多时收紧节奏
    if metrics.contact_failures_24h >= 3 {
        recommendations.push(Recommendation {
            id: "stabilize_contact_delivery",
            title: "Stabilize contact delivery",
            rationale: format!(
                "{} contact delivery failure(s) in the last 24h; lowering the daily contact \
                 cap reduces pressure on the sending domain",
                metrics.contact_failures_24h
            ),
            confidence: 0.85,
            patch: MissionUpdate {
                daily_contact_limit: Some((contact_limit - 2).max(DAILY_LIMIT_RANGE.0)),
                ..Default::default()
            },
        });
    }

    // 规则五：补上职级聚焦——尚未配置职级筛选
    if params.seniority.is_empty() {
        recommendations.push(Recommendation {
            id: "define_seniority_focus",
            title: "Define seniority focus",
            rationale: "No seniority filter is configured; focusing on decision-maker \
                        seniorities avoids low-authority leads"
                .to_string(),
            confidence: 0.60,
            patch: MissionUpdate {
                seniority: Some(SeniorityInput::List(
                    DEFAULT_SENIORITY.iter().map(|s| s.to_string()).collect(),
                )),
                ..Default::default()
            },
        });
    }

    recommendations
}

/// 合并各规则补丁
///
/// 仅恰好被一条规则提出的字段进入合并补丁；被多条规则提出
/// 的字段整体落入冲突列表，由操作员定夺
pub fn merge_suggestions(
    recommendations: &[Recommendation],
) -> (MissionUpdate, Vec<FieldConflict>) {
    let mut proposals: Vec<(String, Vec<FieldProposal>)> = Vec::new();

    for recommendation in recommendations {
        let Ok(Value::Object(fields)) = serde_json::to_value(&recommendation.patch) else {
            continue;
        };
        for (field, value) in fields {
            match proposals.iter_mut().find(|(name, _)| *name == field) {
                Some((_, list)) => list.push(FieldProposal {
                    rule_id: recommendation.id,
                    value,
                }),
                None => proposals.push((
                    field,
                    vec![FieldProposal {
                        rule_id: recommendation.id,
                        value,
                    }],
                )),
            }
        }
    }

    let mut merged = serde_json::Map::new();
    let mut conflicts = Vec::new();
    for (field, list) in proposals {
        if list.len() == 1 {
            merged.insert(field, list.into_iter().next().map(|p| p.value).unwrap_or(Value::Null));
        } else {
            conflicts.push(FieldConflict {
                field,
                proposals: list,
            });
        }
    }

    let merged: MissionUpdate =
        serde_json::from_value(Value::Object(merged)).unwrap_or_default();
    (merged, conflicts)
}

/// 调优引擎服务
///
/// 读路径计算指标快照与建议；写路径在操作员显式确认后提交
/// 补丁，并把投影传播到所有仍处于 pending 的流水线单元。
/// 本服务从不调用外部供应商
pub struct TuningService<M, T>
where
    M: MissionRepository + 'static,
    T: TaskRepository + 'static,
{
    mission_repo: Arc<M>,
    task_repo: Arc<T>,
    lead_repo: Arc<dyn LeadRepository>,
    contacted_repo: Arc<dyn ContactedLeadRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
}

impl<M, T> TuningService<M, T>
where
    M: MissionRepository + Send + Sync,
    T: TaskRepository + Send + Sync,
{
    pub fn new(
        mission_repo: Arc<M>,
        task_repo: Arc<T>,
        lead_repo: Arc<dyn LeadRepository>,
        contacted_repo: Arc<dyn ContactedLeadRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            mission_repo,
            task_repo,
            lead_repo,
            contacted_repo,
            activity_repo,
        }
    }

    /// 计算任务的24小时指标快照（只读）
    pub async fn metrics(&self, mission: &Mission) -> Result<MissionMetrics, TuningServiceError> {
        let since = (Utc::now() - Duration::hours(24)).fixed_offset();
        let midnight = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().fixed_offset())
            .unwrap_or_else(|| since);

        let leads_found_24h = self
            .activity_repo
            .count_events(mission.id, LeadEventKind::LeadFound, None, since)
            .await?;
        let enrich_email_found_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadEnriched,
                Some(OUTCOME_EMAIL_FOUND),
                since,
            )
            .await?;
        let enrich_no_email_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadEnriched,
                Some(OUTCOME_NO_EMAIL),
                since,
            )
            .await?;
        let investigate_completed_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadInvestigated,
                Some(OUTCOME_COMPLETED),
                since,
            )
            .await?;
        let contacts_sent_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadContacted,
                Some(OUTCOME_SENT),
                since,
            )
            .await?;
        let contact_failures_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadContacted,
                Some(OUTCOME_FAILED),
                since,
            )
            .await?;
        let contacts_blocked_24h = self
            .activity_repo
            .count_events(
                mission.id,
                LeadEventKind::LeadContacted,
                Some(OUTCOME_BLOCKED),
                since,
            )
            .await?;

        let searches_completed_24h = self
            .task_repo
            .count_completed_since(mission.id, TaskType::Search, since)
            .await?;

        let leads_awaiting_enrichment =
            self.lead_repo.count_queued(mission.organization_id).await?;
        let enriched_awaiting_contact = self
            .lead_repo
            .count_enriched_with_email(mission.organization_id)
            .await?;
        let do_not_contact_leads = self
            .lead_repo
            .count_do_not_contact(mission.organization_id)
            .await?;

        let org_contacts_today = self
            .contacted_repo
            .count_created_since(mission.organization_id, midnight)
            .await?;
        let mission_contacts_today = self
            .contacted_repo
            .count_created_since_by_mission(mission.id, midnight)
            .await?;

        Ok(MissionMetrics {
            leads_found_24h,
            searches_completed_24h,
            enrich_email_found_24h,
            enrich_no_email_24h,
            investigate_completed_24h,
            contacts_sent_24h,
            contact_failures_24h,
            contacts_blocked_24h,
            leads_awaiting_enrichment,
            enriched_awaiting_contact,
            do_not_contact_leads,
            org_contacts_today,
            mission_contacts_today,
        })
    }

    /// 读取调优快照：任务 + 指标 + 建议 + 合并补丁
    pub async fn snapshot(&self, mission_id: Uuid) -> Result<TuningSnapshot, TuningServiceError> {
        let mission = self
            .mission_repo
            .find_by_id(mission_id)
            .await?
            .ok_or(TuningServiceError::MissionNotFound(mission_id))?;

        self.snapshot_for(mission).await
    }

    async fn snapshot_for(&self, mission: Mission) -> Result<TuningSnapshot, TuningServiceError> {
        let metrics = self.metrics(&mission).await?;
        let recommendations = evaluate_rules(&mission.params, &metrics);
        let (suggested_patch, conflicts) = merge_suggestions(&recommendations);

        let reasoning = if recommendations.is_empty() {
            "No tuning adjustments recommended for the current 24h window".to_string()
        } else {
            let mut parts: Vec<String> = recommendations
                .iter()
                .map(|r| format!("{}: {}", r.title, r.rationale))
                .collect();
            if !conflicts.is_empty() {
                parts.push(format!(
                    "{} field(s) have competing proposals and need an operator decision",
                    conflicts.len()
                ));
            }
            parts.join(". ")
        };

        Ok(TuningSnapshot {
            mission,
            metrics,
            recommendations,
            suggested_patch,
            conflicts,
            reasoning,
        })
    }

    /// 提交补丁（显式写路径）
    ///
    /// 校验合并后持久化参数集，写审计日志，再把类型化投影
    /// 传播到任务下所有仍处于 pending 的流水线单元。传播是
    /// 尽力而为：与取件并发的单元可能带旧载荷执行
    pub async fn apply(
        &self,
        mission_id: Uuid,
        update: &MissionUpdate,
    ) -> Result<TuningApplyOutcome, TuningServiceError> {
        let mission = self
            .mission_repo
            .find_by_id(mission_id)
            .await?
            .ok_or(TuningServiceError::MissionNotFound(mission_id))?;

        let next_params = apply_update(&mission.params, update);
        let mission = self
            .mission_repo
            .update_params(mission_id, &next_params)
            .await?;

        let applied = serde_json::to_value(update).unwrap_or(Value::Null);
        let audit = ActivityEntry::unit_outcome(
            mission.id,
            mission.organization_id,
            ActivityLevel::Info,
            "mission parameters updated".to_string(),
            applied,
        );
        if let Err(e) = self.activity_repo.append(&audit).await {
            warn!("failed to write tuning audit entry: {}", e);
        }

        let pending = self
            .task_repo
            .find_pending_by_mission(
                mission_id,
                &[
                    TaskType::GenerateCampaign,
                    TaskType::Search,
                    TaskType::Enrich,
                    TaskType::Contact,
                    TaskType::ContactInitial,
                ],
            )
            .await?;

        let mut patched = 0u64;
        for task in &pending {
            let projected = project_payload(task, &mission);
            if self
                .task_repo
                .update_payload_if_pending(task.id, &projected)
                .await?
            {
                patched += 1;
            }
        }

        info!(
            "tuning patch applied to mission {}, {} pending task(s) repainted",
            mission_id, patched
        );

        let snapshot = self.snapshot_for(mission).await?;
        Ok(TuningApplyOutcome {
            patched_pending_tasks: patched,
            snapshot,
        })
    }
}

/// 按单元类型把新参数投影进载荷
///
/// 搜索/生成活动单元获得全量定向字段；丰富化单元只获得深度
/// 与活动字段；外联单元只获得活动字段。线索列表一律保留
fn project_payload(task: &AgentTask, mission: &Mission) -> TaskPayload {
    let params = &mission.params;
    match &task.payload {
        TaskPayload::GenerateCampaign(payload) => {
            TaskPayload::GenerateCampaign(project_targeting(payload, mission))
        }
        TaskPayload::Search(payload) => TaskPayload::Search(project_targeting(payload, mission)),
        TaskPayload::Enrich(payload) => TaskPayload::Enrich(EnrichPayload {
            leads: payload.leads.clone(),
            enrichment_level: params
                .enrichment_level
                .unwrap_or(payload.enrichment_level),
            campaign_name: params
                .campaign_name
                .clone()
                .or_else(|| payload.campaign_name.clone()),
        }),
        TaskPayload::Contact(payload) => TaskPayload::Contact(ContactPayload {
            leads: payload.leads.clone(),
            campaign_name: params
                .campaign_name
                .clone()
                .unwrap_or_else(|| payload.campaign_name.clone()),
        }),
    }
}

fn project_targeting(payload: &TargetingPayload, mission: &Mission) -> TargetingPayload {
    let params = &mission.params;
    TargetingPayload {
        mission_title: Some(mission.title.clone()),
        job_title: params.job_title.clone(),
        location: params.location.clone(),
        industry: params.industry.clone(),
        keywords: params.keywords.clone(),
        company_size: params.company_size.clone(),
        seniority: params.seniority.clone(),
        enrichment_level: params.enrichment_level,
        campaign_name: params
            .campaign_name
            .clone()
            .or_else(|| payload.campaign_name.clone()),
        campaign_context: params.campaign_context.clone(),
        requested_by: payload.requested_by,
    }
}
