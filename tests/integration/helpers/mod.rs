// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use prospectrs::domain::models::mission::{Mission, MissionParams};
use prospectrs::domain::models::task::{AgentTask, TaskPayload};
use prospectrs::domain::providers::{
    EnrichedLead, EnrichmentProvider, EnrichmentRequest, FoundLead, LeadSearchProvider,
    LeadSearchRequest, ProviderError,
};
use prospectrs::domain::repositories::mission_repository::MissionRepository;
use prospectrs::domain::repositories::task_repository::TaskRepository;
use prospectrs::domain::services::tuning_service::TuningService;
use prospectrs::infrastructure::repositories::activity_repo_impl::ActivityRepositoryImpl;
use prospectrs::infrastructure::repositories::campaign_repo_impl::CampaignRepositoryImpl;
use prospectrs::infrastructure::repositories::contacted_lead_repo_impl::ContactedLeadRepositoryImpl;
use prospectrs::infrastructure::repositories::lead_repo_impl::LeadRepositoryImpl;
use prospectrs::infrastructure::repositories::mission_repo_impl::MissionRepositoryImpl;
use prospectrs::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use prospectrs::infrastructure::repositories::usage_repo_impl::UsageRepositoryImpl;
use prospectrs::workers::pipeline_worker::PipelineWorker;

/// 测试装配：内存SQLite上的完整仓库集
pub struct TestHarness {
    pub db: Arc<DatabaseConnection>,
    pub task_repo: Arc<TaskRepositoryImpl>,
    pub mission_repo: Arc<MissionRepositoryImpl>,
    pub usage_repo: Arc<UsageRepositoryImpl>,
    pub lead_repo: Arc<LeadRepositoryImpl>,
    pub campaign_repo: Arc<CampaignRepositoryImpl>,
    pub contacted_repo: Arc<ContactedLeadRepositoryImpl>,
    pub activity_repo: Arc<ActivityRepositoryImpl>,
}

/// 创建测试装配
///
/// 内存SQLite必须固定单连接，否则连接池的每个连接各自
/// 持有一份独立的内存数据库
pub async fn setup() -> TestHarness {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let db = Arc::new(db);
    TestHarness {
        task_repo: Arc::new(TaskRepositoryImpl::new(db.clone())),
        mission_repo: Arc::new(MissionRepositoryImpl::new(db.clone())),
        usage_repo: Arc::new(UsageRepositoryImpl::new(db.clone())),
        lead_repo: Arc::new(LeadRepositoryImpl::new(db.clone())),
        campaign_repo: Arc::new(CampaignRepositoryImpl::new(db.clone())),
        contacted_repo: Arc::new(ContactedLeadRepositoryImpl::new(db.clone())),
        activity_repo: Arc::new(ActivityRepositoryImpl::new(db.clone())),
        db,
    }
}

/// 进程内搜索供应商桩
///
/// 返回预先配置的结果并记录收到的请求
pub struct StubSearchProvider {
    pub results: Vec<FoundLead>,
    pub requests: Mutex<Vec<LeadSearchRequest>>,
    pub fail_with: Option<ProviderError>,
}

impl StubSearchProvider {
    pub fn returning(results: Vec<FoundLead>) -> Arc<Self> {
        Arc::new(Self {
            results,
            requests: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    pub fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            results: Vec::new(),
            requests: Mutex::new(Vec::new()),
            fail_with: Some(error),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl LeadSearchProvider for StubSearchProvider {
    async fn search(&self, request: &LeadSearchRequest) -> Result<Vec<FoundLead>, ProviderError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(request.clone());
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "stub_search"
    }
}

/// 进程内丰富化供应商桩
///
/// 回显收到的候选批次；with_email 控制是否为每条线索揭示邮箱
pub struct StubEnrichmentProvider {
    pub with_email: bool,
    pub requests: Mutex<Vec<EnrichmentRequest>>,
}

impl StubEnrichmentProvider {
    pub fn echoing(with_email: bool) -> Arc<Self> {
        Arc::new(Self {
            with_email,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }

    pub fn last_request(&self) -> Option<EnrichmentRequest> {
        self.requests.lock().expect("lock poisoned").last().cloned()
    }
}

#[async_trait]
impl EnrichmentProvider for StubEnrichmentProvider {
    async fn enrich(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<Vec<EnrichedLead>, ProviderError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(request.clone());

        Ok(request
            .leads
            .iter()
            .map(|candidate| EnrichedLead {
                id: candidate.id,
                full_name: candidate.full_name.clone(),
                linkedin_url: candidate.linkedin_url.clone(),
                company_name: candidate.company_name.clone(),
                title: candidate.title.clone(),
                email: if self.with_email {
                    Some(format!(
                        "{}@example.com",
                        candidate.full_name.to_lowercase().replace(' ', ".")
                    ))
                } else {
                    None
                },
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "stub_enrichment"
    }
}

/// 基于装配与供应商桩构建流水线工作器
pub fn build_worker(
    harness: &TestHarness,
    search: Arc<StubSearchProvider>,
    enrichment: Arc<StubEnrichmentProvider>,
) -> PipelineWorker<TaskRepositoryImpl, MissionRepositoryImpl, UsageRepositoryImpl, LeadRepositoryImpl>
{
    PipelineWorker::new(
        harness.task_repo.clone(),
        harness.mission_repo.clone(),
        harness.usage_repo.clone(),
        harness.lead_repo.clone(),
        harness.campaign_repo.clone(),
        harness.contacted_repo.clone(),
        harness.activity_repo.clone(),
        search,
        enrichment,
        5,
    )
}

/// 构建调优服务
pub fn build_tuning_service(
    harness: &TestHarness,
) -> TuningService<MissionRepositoryImpl, TaskRepositoryImpl> {
    TuningService::new(
        harness.mission_repo.clone(),
        harness.task_repo.clone(),
        harness.lead_repo.clone(),
        harness.contacted_repo.clone(),
        harness.activity_repo.clone(),
    )
}

/// 创建并持久化一个测试任务
pub async fn seed_mission(harness: &TestHarness, params: MissionParams) -> Mission {
    let mission = Mission::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Fintech CTOs".to_string(),
        Some("Find fintech CTOs in Europe".to_string()),
        params,
    );
    harness
        .mission_repo
        .create(&mission)
        .await
        .expect("failed to seed mission")
}

/// 创建并持久化一个待处理单元
pub async fn seed_task(
    harness: &TestHarness,
    mission: &Mission,
    payload: TaskPayload,
) -> AgentTask {
    let task = AgentTask::new(mission.id, mission.organization_id, payload);
    harness
        .task_repo
        .create(&task)
        .await
        .expect("failed to seed task")
}

/// 构造一批搜索命中
pub fn found_leads(count: usize) -> Vec<FoundLead> {
    (0..count)
        .map(|i| FoundLead {
            full_name: format!("Test Lead {}", i),
            title: Some("CTO".to_string()),
            organization_name: Some(format!("Company {}", i)),
            email: None,
            linkedin_url: Some(format!("https://linkedin.com/in/test-lead-{}", i)),
        })
        .collect()
}
