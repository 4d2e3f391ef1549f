// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use uuid::Uuid;

use super::helpers::{
    build_worker, found_leads, seed_mission, seed_task, setup, StubEnrichmentProvider,
    StubSearchProvider,
};
use prospectrs::domain::models::mission::{EnrichmentLevel, MissionParams};
use prospectrs::domain::models::task::{
    ContactPayload, EnrichPayload, LeadRef, TargetingPayload, TaskPayload, TaskStatus, TaskType,
};
use prospectrs::domain::models::usage::UsageKind;
use prospectrs::domain::providers::ProviderError;
use prospectrs::domain::repositories::campaign_repository::CampaignRepository;
use prospectrs::domain::repositories::contacted_lead_repository::ContactedLeadRepository;
use prospectrs::domain::repositories::task_repository::TaskRepository;
use prospectrs::domain::repositories::usage_repository::UsageRepository;
use prospectrs::domain::models::campaign::Campaign;

fn search_payload(mission_title: &str, level: Option<EnrichmentLevel>) -> TargetingPayload {
    TargetingPayload {
        mission_title: Some(mission_title.to_string()),
        job_title: Some("CTO".to_string()),
        location: Some("Berlin".to_string()),
        industry: Some("Fintech".to_string()),
        keywords: Some("payments".to_string()),
        enrichment_level: level,
        campaign_name: Some("Fintech CTOs Outreach".to_string()),
        requested_by: Some(Uuid::new_v4()),
        ..Default::default()
    }
}

fn lead_refs(count: usize) -> Vec<LeadRef> {
    (0..count)
        .map(|i| LeadRef {
            id: Uuid::new_v4(),
            full_name: format!("Ref Lead {}", i),
            title: Some("CTO".to_string()),
            company_name: Some(format!("Company {}", i)),
            email: None,
            linkedin_url: None,
        })
        .collect()
}

/// 搜索成功路径：记账一次搜索与三条线索，并链接丰富化单元
#[tokio::test]
async fn test_search_happy_path_records_usage_and_chains_enrich() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_search_limit: Some(1),
            enrichment_level: Some(EnrichmentLevel::Basic),
            ..Default::default()
        },
    )
    .await;

    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Search(search_payload("Fintech CTOs", Some(EnrichmentLevel::Basic))),
    )
    .await;

    let search = StubSearchProvider::returning(found_leads(3));
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search.clone(), enrichment);

    let outcome = worker.run_batch().await.expect("batch should run");
    assert_eq!(outcome.processed, 1);
    assert_eq!(outcome.tasks, vec![task.id]);

    // 单元完成且记录找到的线索数
    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.result.as_ref().unwrap()["leadsFound"], 3);
    assert!(done.error_message.is_none());

    // 用量账本：一次搜索调用，三条线索
    let today = Utc::now().date_naive();
    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.search_runs, 1);
    assert_eq!(usage.leads_searched, 3);

    // 恰好链接了一个携带线索与深度的丰富化单元
    let pending = harness
        .task_repo
        .find_pending_by_mission(mission.id, &[TaskType::Enrich])
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    match &pending[0].payload {
        TaskPayload::Enrich(payload) => {
            assert_eq!(payload.leads.len(), 3);
            assert!(payload.leads.len() <= 10);
            assert_eq!(payload.enrichment_level, EnrichmentLevel::Basic);
            assert_eq!(
                payload.campaign_name.as_deref(),
                Some("Fintech CTOs Outreach")
            );
        }
        other => panic!("expected enrich payload, got {:?}", other),
    }
}

/// 当日搜索次数已到上限：跳过结果记为成功，不链接后续单元
#[tokio::test]
async fn test_search_skips_when_run_limit_reached() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_search_limit: Some(1),
            enrichment_level: Some(EnrichmentLevel::Basic),
            ..Default::default()
        },
    )
    .await;

    // 当日已经跑满一次搜索
    let today = Utc::now().date_naive();
    let consumed = harness
        .usage_repo
        .try_consume(mission.organization_id, today, UsageKind::SearchRuns, 1, 1)
        .await
        .unwrap();
    assert!(consumed);

    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Search(search_payload("Fintech CTOs", Some(EnrichmentLevel::Basic))),
    )
    .await;

    let search = StubSearchProvider::returning(found_leads(3));
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search.clone(), enrichment);

    worker.run_batch().await.expect("batch should run");

    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    let result = done.result.unwrap();
    assert_eq!(result["skipped"], true);
    assert_eq!(result["reason"], "daily_limit_reached");

    // 供应商没有被调用，账本不变，也没有链式单元
    assert_eq!(search.request_count(), 0);
    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.search_runs, 1);
    assert_eq!(usage.leads_searched, 0);

    let pending = harness
        .task_repo
        .find_pending_by_mission(mission.id, &[TaskType::Enrich])
        .await
        .unwrap();
    assert!(pending.is_empty());
}

/// 外联单元指向不存在的活动：硬失败，错误点名活动，不留下外联记录
#[tokio::test]
async fn test_contact_fails_on_missing_campaign() {
    let harness = setup().await;
    let mission = seed_mission(&harness, MissionParams::default()).await;

    let mut leads = lead_refs(2);
    for lead in &mut leads {
        lead.email = Some("lead@example.com".to_string());
    }
    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Contact(ContactPayload {
            leads,
            campaign_name: "Ghost Campaign".to_string(),
        }),
    )
    .await;

    let search = StubSearchProvider::returning(Vec::new());
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment);

    worker.run_batch().await.expect("batch should run");

    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Failed);
    let message = done.error_message.unwrap();
    assert!(message.contains("Ghost Campaign"), "got: {}", message);
    assert!(done.result.is_none());

    let since = (Utc::now() - chrono::Duration::hours(1)).fixed_offset();
    let contacted = harness
        .contacted_repo
        .count_created_since(mission.organization_id, since)
        .await
        .unwrap();
    assert_eq!(contacted, 0);
}

/// 剩余配额不足时截断候选批次而不是整体拒绝
#[tokio::test]
async fn test_enrich_truncates_to_remaining_quota() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_enrich_limit: Some(50),
            ..Default::default()
        },
    )
    .await;

    // 当日已用48，剩余2
    let today = Utc::now().date_naive();
    let consumed = harness
        .usage_repo
        .try_consume(
            mission.organization_id,
            today,
            UsageKind::LeadsEnriched,
            48,
            50,
        )
        .await
        .unwrap();
    assert!(consumed);

    let campaign = Campaign::new(
        mission.organization_id,
        "Fintech CTOs Outreach".to_string(),
        "subject".to_string(),
        "body".to_string(),
    );
    harness.campaign_repo.create(&campaign).await.unwrap();

    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Enrich(EnrichPayload {
            leads: lead_refs(5),
            enrichment_level: EnrichmentLevel::Basic,
            campaign_name: Some("Fintech CTOs Outreach".to_string()),
        }),
    )
    .await;

    let search = StubSearchProvider::returning(Vec::new());
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment.clone());

    worker.run_batch().await.expect("batch should run");

    // 恰好请求2条：min(remaining, candidateCount)
    let request = enrichment.last_request().expect("provider should be called");
    assert_eq!(request.leads.len(), 2);
    assert!(request.reveal_email);
    assert!(!request.reveal_phone);

    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.result.unwrap()["enrichedCount"], 2);

    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.leads_enriched, 50);

    // 链接的外联单元只带实际丰富化的两条线索
    let pending = harness
        .task_repo
        .find_pending_by_mission(mission.id, &[TaskType::Contact])
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    match &pending[0].payload {
        TaskPayload::Contact(payload) => assert_eq!(payload.leads.len(), 2),
        other => panic!("expected contact payload, got {:?}", other),
    }
}

/// 配额用尽时跳过且完全不触碰供应商
#[tokio::test]
async fn test_enrich_skips_at_limit_without_provider_call() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_investigate_limit: Some(20),
            ..Default::default()
        },
    )
    .await;

    let today = Utc::now().date_naive();
    harness
        .usage_repo
        .try_consume(
            mission.organization_id,
            today,
            UsageKind::LeadsInvestigated,
            20,
            20,
        )
        .await
        .unwrap();

    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Enrich(EnrichPayload {
            leads: lead_refs(3),
            enrichment_level: EnrichmentLevel::Deep,
            campaign_name: None,
        }),
    )
    .await;

    let search = StubSearchProvider::returning(Vec::new());
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment.clone());

    worker.run_batch().await.expect("batch should run");

    assert_eq!(enrichment.request_count(), 0);
    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.result.unwrap()["skipped"], true);

    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.leads_investigated, 20);
}

/// 深度档走调查配额并请求电话揭示
#[tokio::test]
async fn test_deep_enrichment_uses_investigate_tier() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_investigate_limit: Some(20),
            ..Default::default()
        },
    )
    .await;

    seed_task(
        &harness,
        &mission,
        TaskPayload::Enrich(EnrichPayload {
            leads: lead_refs(4),
            enrichment_level: EnrichmentLevel::Deep,
            campaign_name: None,
        }),
    )
    .await;

    let search = StubSearchProvider::returning(Vec::new());
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment.clone());

    worker.run_batch().await.expect("batch should run");

    let request = enrichment.last_request().expect("provider should be called");
    assert!(request.reveal_email);
    assert!(request.reveal_phone);

    let today = Utc::now().date_naive();
    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.leads_investigated, 4);
    assert_eq!(usage.leads_enriched, 0);
}

/// 生成活动按名称幂等，并且总是链接搜索单元
#[tokio::test]
async fn test_generate_campaign_idempotent_and_chains_search() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            auto_campaign: true,
            ..Default::default()
        },
    )
    .await;

    let payload = TargetingPayload {
        mission_title: Some("Fintech CTOs".to_string()),
        job_title: Some("CTO".to_string()),
        industry: Some("Fintech".to_string()),
        campaign_context: Some("We met at FinForum".to_string()),
        requested_by: Some(Uuid::new_v4()),
        ..Default::default()
    };

    let search = StubSearchProvider::returning(Vec::new());
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment);

    let first = seed_task(
        &harness,
        &mission,
        TaskPayload::GenerateCampaign(payload.clone()),
    )
    .await;
    worker.run_batch().await.expect("batch should run");

    let done = harness
        .task_repo
        .find_by_id(first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    let result = done.result.unwrap();
    assert_eq!(result["campaignGenerated"], true);
    assert_eq!(result["campaignName"], "Fintech CTOs Outreach");

    let campaign = harness
        .campaign_repo
        .find_by_name(mission.organization_id, "Fintech CTOs Outreach")
        .await
        .unwrap()
        .expect("campaign should exist");
    assert!(campaign.subject.contains("CTO"));
    assert!(campaign.body.contains("We met at FinForum"));

    let chained = harness
        .task_repo
        .find_pending_by_mission(mission.id, &[TaskType::Search])
        .await
        .unwrap();
    assert_eq!(chained.len(), 1);
    match &chained[0].payload {
        TaskPayload::Search(search_payload) => {
            assert_eq!(
                search_payload.campaign_name.as_deref(),
                Some("Fintech CTOs Outreach")
            );
        }
        other => panic!("expected search payload, got {:?}", other),
    }

    // 第二次生成同名活动：不重复创建，仍旧链接搜索单元。
    // 先清掉上一次链接的搜索单元，避免它被本批次一并执行
    harness
        .task_repo
        .mark_completed(chained[0].id, serde_json::json!({}))
        .await
        .unwrap();

    let second = seed_task(
        &harness,
        &mission,
        TaskPayload::GenerateCampaign(payload.clone()),
    )
    .await;
    worker.run_batch().await.expect("batch should run");

    let done = harness
        .task_repo
        .find_by_id(second.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);

    let again = harness
        .campaign_repo
        .find_by_name(mission.organization_id, "Fintech CTOs Outreach")
        .await
        .unwrap()
        .expect("campaign should exist");
    assert_eq!(again.id, campaign.id);

    let chained_again = harness
        .task_repo
        .find_pending_by_mission(mission.id, &[TaskType::Search])
        .await
        .unwrap();
    assert_eq!(chained_again.len(), 1);
}

/// 一个单元失败不阻断批次里的其余单元
#[tokio::test]
async fn test_failure_does_not_stop_batch() {
    let harness = setup().await;
    let mission = seed_mission(
        &harness,
        MissionParams {
            daily_search_limit: Some(3),
            ..Default::default()
        },
    )
    .await;

    let failing = seed_task(
        &harness,
        &mission,
        TaskPayload::Contact(ContactPayload {
            leads: Vec::new(),
            campaign_name: "Missing Campaign".to_string(),
        }),
    )
    .await;
    let succeeding = seed_task(
        &harness,
        &mission,
        TaskPayload::Search(search_payload("Fintech CTOs", None)),
    )
    .await;

    let search = StubSearchProvider::returning(found_leads(2));
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment);

    let outcome = worker.run_batch().await.expect("batch should run");
    assert_eq!(outcome.processed, 2);

    let failed = harness
        .task_repo
        .find_by_id(failing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.status, TaskStatus::Failed);

    let completed = harness
        .task_repo
        .find_by_id(succeeding.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);
    assert_eq!(completed.result.unwrap()["leadsFound"], 2);
}

/// 供应商错误文本原样保留在失败单元上
#[tokio::test]
async fn test_search_provider_failure_preserves_error_text() {
    let harness = setup().await;
    let mission = seed_mission(&harness, MissionParams::default()).await;
    let task = seed_task(
        &harness,
        &mission,
        TaskPayload::Search(search_payload("Fintech CTOs", None)),
    )
    .await;

    let search = StubSearchProvider::failing(ProviderError::UpstreamError {
        status: 502,
        message: "upstream exploded".to_string(),
    });
    let enrichment = StubEnrichmentProvider::echoing(true);
    let worker = build_worker(&harness, search, enrichment);

    worker.run_batch().await.expect("batch should run");

    let done = harness
        .task_repo
        .find_by_id(task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TaskStatus::Failed);
    let message = done.error_message.unwrap();
    assert!(message.contains("502"), "got: {}", message);
    assert!(message.contains("upstream exploded"), "got: {}", message);

    // 失败不记账
    let today = Utc::now().date_naive();
    let usage = harness
        .usage_repo
        .get_or_create(mission.organization_id, today)
        .await
        .unwrap();
    assert_eq!(usage.search_runs, 0);
}
