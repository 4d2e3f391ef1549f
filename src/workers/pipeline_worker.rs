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

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::models::activity::{
    ActivityEntry, ActivityLevel, LeadEventKind, OUTCOME_COMPLETED, OUTCOME_EMAIL_FOUND,
    OUTCOME_NO_EMAIL, OUTCOME_QUEUED,
};
use crate::domain::models::campaign::Campaign;
use crate::domain::models::lead::{ContactedLead, Lead, CONTACT_PROVIDER};
use crate::domain::models::mission::{EnrichmentLevel, Mission, MissionParams};
use crate::domain::models::task::{
    AgentTask, ContactPayload, EnrichPayload, LeadRef, TargetingPayload, TaskPayload,
};
use crate::domain::models::usage::UsageKind;
use crate::domain::providers::{
    EnrichmentCandidate, EnrichmentProvider, EnrichmentRequest, LeadSearchProvider,
    LeadSearchRequest,
};
use crate::domain::repositories::activity_repository::ActivityRepository;
use crate::domain::repositories::campaign_repository::CampaignRepository;
use crate::domain::repositories::contacted_lead_repository::ContactedLeadRepository;
use crate::domain::repositories::lead_repository::{LeadEnrichmentUpdate, LeadRepository};
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::usage_repository::UsageRepository;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;

/// 单次搜索请求的结果数上限
const SEARCH_RESULT_CAP: u32 = 100;
/// 链式丰富化单元携带的线索数上限
const ENRICH_CHAIN_CAP: usize = 10;
/// 配额跳过结果的原因标识
const SKIP_REASON: &str = "daily_limit_reached";

/// 一次批处理调用的结果
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// 本次处理的单元数
    pub processed: usize,
    /// 本次处理的单元ID列表
    pub tasks: Vec<Uuid>,
}

/// 推导外联活动名称
///
/// 优先使用载荷中已解析的活动名称，其次从任务标题派生，
/// 最后回退到通用标签
pub fn derive_campaign_name(payload: &TargetingPayload) -> String {
    if let Some(name) = &payload.campaign_name {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    match &payload.mission_title {
        Some(title) if !title.trim().is_empty() => format!("{} Outreach", title.trim()),
        _ => "Lead Outreach".to_string(),
    }
}

/// 构造配额跳过结果
///
/// 跳过是成功终态，不是失败；不链接任何后续单元
fn skip_outcome() -> Value {
    json!({ "skipped": true, "reason": SKIP_REASON })
}

/// 流水线工作器
///
/// 任务编排核心：拉取一批待处理单元，按载荷变体分派类型化
/// 处理器，执行配额检查，持久化终态，并按需入队后续单元。
/// 单次调用内严格顺序处理；单元失败不阻断批次。
pub struct PipelineWorker<T, M, U, L>
where
    T: TaskRepository + 'static,
    M: MissionRepository + 'static,
    U: UsageRepository + 'static,
    L: LeadRepository + 'static,
{
    task_repo: Arc<T>,
    mission_repo: Arc<M>,
    usage_repo: Arc<U>,
    lead_repo: Arc<L>,
    campaign_repo: Arc<dyn CampaignRepository>,
    contacted_repo: Arc<dyn ContactedLeadRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    search_provider: Arc<dyn LeadSearchProvider>,
    enrichment_provider: Arc<dyn EnrichmentProvider>,
    batch_size: u64,
}

impl<T, M, U, L> PipelineWorker<T, M, U, L>
where
    T: TaskRepository + Send + Sync,
    M: MissionRepository + Send + Sync,
    U: UsageRepository + Send + Sync,
    L: LeadRepository + Send + Sync,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        task_repo: Arc<T>,
        mission_repo: Arc<M>,
        usage_repo: Arc<U>,
        lead_repo: Arc<L>,
        campaign_repo: Arc<dyn CampaignRepository>,
        contacted_repo: Arc<dyn ContactedLeadRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        search_provider: Arc<dyn LeadSearchProvider>,
        enrichment_provider: Arc<dyn EnrichmentProvider>,
        batch_size: u64,
    ) -> Self {
        Self {
            task_repo,
            mission_repo,
            usage_repo,
            lead_repo,
            campaign_repo,
            contacted_repo,
            activity_repo,
            search_provider,
            enrichment_provider,
            batch_size,
        }
    }

    /// 执行一次批处理
    ///
    /// 拉取最多 batch_size 个 pending 单元并顺序处理。批次
    /// 拉取失败是唯一的致命路径；之后的失败都只作用于单元。
    ///
    /// # 返回值
    ///
    /// * `Ok(BatchOutcome)` - 已处理的单元数与ID列表
    /// * `Err(WorkerError)` - 批次拉取失败
    pub async fn run_batch(&self) -> Result<BatchOutcome, WorkerError> {
        let tasks = self.task_repo.fetch_pending(self.batch_size).await?;

        info!("pipeline batch picked up {} pending task(s)", tasks.len());

        let mut task_ids = Vec::with_capacity(tasks.len());
        for task in tasks {
            let id = task.id;
            self.process_task(task).await;
            task_ids.push(id);
        }

        Ok(BatchOutcome {
            processed: task_ids.len(),
            tasks: task_ids,
        })
    }

    /// 处理单个工作单元
    ///
    /// 标记处理中 → 加载任务配置（尽力而为）→ 分派处理器 →
    /// 恰好落入 completed 或 failed 之一
    #[instrument(skip(self, task), fields(task_id = %task.id, task_type = %task.task_type))]
    async fn process_task(&self, task: AgentTask) {
        let task_id = task.id;
        let task = match task.start() {
            Ok(task) => task,
            Err(e) => {
                warn!("task {} skipped: {}", task_id, e);
                return;
            }
        };

        if let Err(e) = self
            .task_repo
            .mark_processing(task.id, task.started_at.unwrap_or_else(|| Utc::now().into()))
            .await
        {
            error!("failed to mark task {} processing: {}", task.id, e);
            return;
        }

        // 任务配置按尽力而为加载，缺失时处理器使用默认上限
        let mission = match self.mission_repo.find_by_id(task.mission_id).await {
            Ok(mission) => mission,
            Err(e) => {
                warn!("mission lookup failed for task {}: {}", task.id, e);
                None
            }
        };
        let params = mission
            .as_ref()
            .map(|m| m.params.clone())
            .unwrap_or_default();

        let outcome = self.dispatch(&task, mission.as_ref(), &params).await;

        match outcome {
            Ok(result) => {
                if let Err(e) = self.task_repo.mark_completed(task.id, result.clone()).await {
                    error!("failed to mark task {} completed: {}", task.id, e);
                    return;
                }
                self.log_unit_outcome(
                    &task,
                    ActivityLevel::Success,
                    format!("{} task completed", task.task_type),
                    result,
                )
                .await;
            }
            Err(e) => {
                let message = e.to_string();
                warn!("task {} failed: {}", task.id, message);
                if let Err(mark_err) = self.task_repo.mark_failed(task.id, &message).await {
                    error!("failed to mark task {} failed: {}", task.id, mark_err);
                    return;
                }
                self.log_unit_outcome(
                    &task,
                    ActivityLevel::Error,
                    message,
                    json!({ "taskId": task.id, "taskType": task.task_type.to_string() }),
                )
                .await;
            }
        }
    }

    /// 按载荷变体分派处理器
    async fn dispatch(
        &self,
        task: &AgentTask,
        mission: Option<&Mission>,
        params: &MissionParams,
    ) -> Result<Value, WorkerError> {
        match &task.payload {
            TaskPayload::GenerateCampaign(payload) => {
                self.handle_generate_campaign(task, payload).await
            }
            TaskPayload::Search(payload) => self.handle_search(task, params, payload).await,
            TaskPayload::Enrich(payload) => {
                self.handle_enrich(task, mission, params, payload).await
            }
            TaskPayload::Contact(payload) => self.handle_contact(task, payload).await,
        }
    }

    /// 处理 GENERATE_CAMPAIGN 单元
    ///
    /// 按名称幂等创建外联活动，并无条件入队携带活动名称的
    /// SEARCH 后续单元
    async fn handle_generate_campaign(
        &self,
        task: &AgentTask,
        payload: &TargetingPayload,
    ) -> Result<Value, WorkerError> {
        let name = derive_campaign_name(payload);

        let existing = self
            .campaign_repo
            .find_by_name(task.organization_id, &name)
            .await?;

        if existing.is_none() {
            let job_title = payload.job_title.as_deref().unwrap_or("your team");
            let industry = payload.industry.as_deref().unwrap_or("your market");

            let subject = format!("Quick intro for {} leaders", job_title);
            let mut body = format!(
                "Hi {{{{firstName}}}},\n\nWe help {} teams in {} find qualified prospects \
                 without the manual research grind. Would you be open to a short call \
                 this week?\n",
                job_title, industry
            );
            if let Some(context) = &payload.campaign_context {
                if !context.trim().is_empty() {
                    body.push_str("\n");
                    body.push_str(context.trim());
                    body.push('\n');
                }
            }

            let campaign = Campaign::new(task.organization_id, name.clone(), subject, body);
            self.campaign_repo.create(&campaign).await?;
            info!("created campaign '{}' for task {}", name, task.id);
        }

        // 无论活动是否新建，都链接一个携带活动名称的搜索单元
        let mut search_payload = payload.clone();
        search_payload.campaign_name = Some(name.clone());
        let follow_up = AgentTask::new(
            task.mission_id,
            task.organization_id,
            TaskPayload::Search(search_payload),
        );
        self.task_repo.create(&follow_up).await?;

        Ok(json!({ "campaignGenerated": true, "campaignName": name }))
    }

    /// 处理 SEARCH 单元
    ///
    /// 检查当日搜索次数配额，调用搜索供应商，入库命中线索，
    /// 在单条语句内记账，并按需链接丰富化单元
    async fn handle_search(
        &self,
        task: &AgentTask,
        params: &MissionParams,
        payload: &TargetingPayload,
    ) -> Result<Value, WorkerError> {
        let today = Utc::now().date_naive();
        let limit = params.search_limit();
        let usage = self
            .usage_repo
            .get_or_create(task.organization_id, today)
            .await?;

        if usage.search_runs >= limit {
            info!(
                "search run limit reached for task {} ({}/{})",
                task.id, usage.search_runs, limit
            );
            return Ok(skip_outcome());
        }

        let request = LeadSearchRequest {
            job_titles: payload.job_title.iter().cloned().collect(),
            locations: payload.location.iter().cloned().collect(),
            industries: payload.industry.iter().cloned().collect(),
            keywords: payload.keywords.clone().unwrap_or_default(),
            limit: SEARCH_RESULT_CAP,
        };

        let found = self.search_provider.search(&request).await?;
        let requested_by = payload.requested_by.unwrap_or(Uuid::nil());

        let leads: Vec<Lead> = found
            .iter()
            .map(|hit| {
                let mut lead = Lead::new(
                    task.organization_id,
                    Some(task.mission_id),
                    requested_by,
                    hit.full_name.clone(),
                );
                lead.title = hit.title.clone();
                lead.company_name = hit.organization_name.clone();
                lead.email = hit.email.clone();
                lead.linkedin_url = hit.linkedin_url.clone();
                lead
            })
            .collect();

        let leads = self.lead_repo.insert_many(&leads).await?;
        let found_count = leads.len();

        for lead in &leads {
            self.log_lead_event(
                task,
                LeadEventKind::LeadFound,
                "found",
                Some(json!({ "leadId": lead.id })),
            )
            .await;
        }

        if found_count > 0 {
            // 仅在产出线索时记账：leads_searched 加量，search_runs 加一
            let applied = self
                .usage_repo
                .record_search(task.organization_id, today, found_count as i32, limit)
                .await?;
            if !applied {
                warn!(
                    "search usage for task {} not recorded, daily window closed concurrently",
                    task.id
                );
            }

            if let Some(level) = payload.enrichment_level {
                let chained: Vec<LeadRef> = leads
                    .iter()
                    .take(ENRICH_CHAIN_CAP)
                    .map(|lead| LeadRef {
                        id: lead.id,
                        full_name: lead.full_name.clone(),
                        title: lead.title.clone(),
                        company_name: lead.company_name.clone(),
                        email: lead.email.clone(),
                        linkedin_url: lead.linkedin_url.clone(),
                    })
                    .collect();

                let follow_up = AgentTask::new(
                    task.mission_id,
                    task.organization_id,
                    TaskPayload::Enrich(EnrichPayload {
                        leads: chained,
                        enrichment_level: level,
                        campaign_name: payload.campaign_name.clone(),
                    }),
                );
                self.task_repo.create(&follow_up).await?;
            }
        }

        Ok(json!({ "leadsFound": found_count }))
    }

    /// 处理 ENRICH 单元
    ///
    /// 按深度选择配额档位，把候选批次截断到剩余配额内（部分
    /// 批次照常处理而不是整体拒绝），调用丰富化供应商一次，
    /// 并按供应商实际产出记账
    async fn handle_enrich(
        &self,
        task: &AgentTask,
        mission: Option<&Mission>,
        params: &MissionParams,
        payload: &EnrichPayload,
    ) -> Result<Value, WorkerError> {
        let today = Utc::now().date_naive();
        let (kind, limit) = match payload.enrichment_level {
            EnrichmentLevel::Basic => (UsageKind::LeadsEnriched, params.enrich_limit()),
            EnrichmentLevel::Deep => (UsageKind::LeadsInvestigated, params.investigate_limit()),
        };

        let usage = self
            .usage_repo
            .get_or_create(task.organization_id, today)
            .await?;
        let remaining = limit - usage.count(kind);

        if remaining <= 0 {
            info!(
                "{} limit reached for task {} ({}/{})",
                kind,
                task.id,
                usage.count(kind),
                limit
            );
            return Ok(skip_outcome());
        }

        let take = payload.leads.len().min(remaining as usize);
        let batch = &payload.leads[..take];

        if batch.is_empty() {
            return Ok(json!({ "enrichedCount": 0 }));
        }

        let requested_by = mission.map(|m| m.owner_id).unwrap_or(Uuid::nil());
        let request = EnrichmentRequest {
            leads: batch
                .iter()
                .map(|lead| EnrichmentCandidate {
                    id: lead.id,
                    full_name: lead.full_name.clone(),
                    linkedin_url: lead.linkedin_url.clone(),
                    company_name: lead.company_name.clone(),
                    title: lead.title.clone(),
                    email: lead.email.clone(),
                })
                .collect(),
            reveal_email: true,
            reveal_phone: payload.enrichment_level == EnrichmentLevel::Deep,
            requested_by,
        };

        let enriched = self.enrichment_provider.enrich(&request).await?;
        let enriched_count = enriched.len();

        let updates: Vec<LeadEnrichmentUpdate> = enriched
            .iter()
            .map(|lead| LeadEnrichmentUpdate {
                lead_id: lead.id,
                email: lead.email.clone(),
                title: lead.title.clone(),
                company_name: lead.company_name.clone(),
                linkedin_url: lead.linkedin_url.clone(),
            })
            .collect();
        self.lead_repo.apply_enrichment(&updates).await?;

        for lead in &enriched {
            let outcome = if lead.email.is_some() {
                OUTCOME_EMAIL_FOUND
            } else {
                OUTCOME_NO_EMAIL
            };
            self.log_lead_event(
                task,
                LeadEventKind::LeadEnriched,
                outcome,
                Some(json!({ "leadId": lead.id })),
            )
            .await;

            if payload.enrichment_level == EnrichmentLevel::Deep {
                self.log_lead_event(
                    task,
                    LeadEventKind::LeadInvestigated,
                    OUTCOME_COMPLETED,
                    Some(json!({ "leadId": lead.id })),
                )
                .await;
            }
        }

        if enriched_count > 0 {
            // 按供应商实际交付量记账，而非请求量
            let applied = self
                .usage_repo
                .try_consume(
                    task.organization_id,
                    today,
                    kind,
                    enriched_count as i32,
                    limit,
                )
                .await?;
            if !applied {
                warn!(
                    "{} usage for task {} not recorded, daily window closed concurrently",
                    kind, task.id
                );
            }

            if let Some(campaign_name) = &payload.campaign_name {
                let contact_leads: Vec<LeadRef> = enriched
                    .iter()
                    .map(|lead| LeadRef {
                        id: lead.id,
                        full_name: lead.full_name.clone(),
                        title: lead.title.clone(),
                        company_name: lead.company_name.clone(),
                        email: lead.email.clone(),
                        linkedin_url: lead.linkedin_url.clone(),
                    })
                    .collect();

                let follow_up = AgentTask::new(
                    task.mission_id,
                    task.organization_id,
                    TaskPayload::Contact(ContactPayload {
                        leads: contact_leads,
                        campaign_name: campaign_name.clone(),
                    }),
                );
                self.task_repo.create(&follow_up).await?;
            }
        }

        Ok(json!({ "enrichedCount": enriched_count }))
    }

    /// 处理 CONTACT 单元
    ///
    /// 活动缺失是硬失败：没有解析到模板就外联绝不可接受。
    /// 本处理器只负责入队外联记录，实际投递由外部协作方完成
    async fn handle_contact(
        &self,
        task: &AgentTask,
        payload: &ContactPayload,
    ) -> Result<Value, WorkerError> {
        let campaign = self
            .campaign_repo
            .find_by_name(task.organization_id, &payload.campaign_name)
            .await?
            .ok_or_else(|| {
                WorkerError::NotFound(format!(
                    "campaign '{}' not found for organization",
                    payload.campaign_name
                ))
            })?;

        let mut records = Vec::new();
        let mut contacted_ids = Vec::new();
        for lead in &payload.leads {
            let Some(email) = &lead.email else {
                continue;
            };

            records.push(ContactedLead {
                id: Uuid::new_v4(),
                organization_id: task.organization_id,
                mission_id: Some(task.mission_id),
                campaign_id: campaign.id,
                lead_id: lead.id,
                name: lead.full_name.clone(),
                email: email.clone(),
                company: lead.company_name.clone(),
                role: lead.title.clone(),
                status: OUTCOME_QUEUED.to_string(),
                provider: CONTACT_PROVIDER.to_string(),
                created_at: Utc::now().into(),
                updated_at: Utc::now().into(),
            });
            contacted_ids.push(lead.id);
        }

        self.contacted_repo.insert_many(&records).await?;
        self.lead_repo.mark_contacted(&contacted_ids).await?;

        for record in &records {
            self.log_lead_event(
                task,
                LeadEventKind::LeadContacted,
                OUTCOME_QUEUED,
                Some(json!({ "leadId": record.lead_id, "campaignId": record.campaign_id })),
            )
            .await;
        }

        Ok(json!({ "contactedCount": records.len() }))
    }

    /// 追加单元结果日志（尽力而为）
    async fn log_unit_outcome(
        &self,
        task: &AgentTask,
        level: ActivityLevel,
        message: String,
        details: Value,
    ) {
        let entry =
            ActivityEntry::unit_outcome(task.mission_id, task.organization_id, level, message, details);
        if let Err(e) = self.activity_repo.append(&entry).await {
            error!("failed to append activity entry for task {}: {}", task.id, e);
        }
    }

    /// 追加线索级事件日志（尽力而为）
    async fn log_lead_event(
        &self,
        task: &AgentTask,
        event_type: LeadEventKind,
        outcome: &str,
        details: Option<Value>,
    ) {
        let entry = ActivityEntry::lead_event(
            task.mission_id,
            task.organization_id,
            event_type,
            outcome,
            details,
        );
        if let Err(e) = self.activity_repo.append(&entry).await {
            error!("failed to append lead event for task {}: {}", task.id, e);
        }
    }
}

#[async_trait]
impl<T, M, U, L> Worker for PipelineWorker<T, M, U, L>
where
    T: TaskRepository + Send + Sync,
    M: MissionRepository + Send + Sync,
    U: UsageRepository + Send + Sync,
    L: LeadRepository + Send + Sync,
{
    async fn run(&self) -> Result<(), WorkerError> {
        self.run_batch().await.map(|_| ())
    }

    fn name(&self) -> &str {
        "pipeline_worker"
    }
}
