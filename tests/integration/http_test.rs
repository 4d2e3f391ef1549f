// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::helpers::{
    build_tuning_service, build_worker, found_leads, setup, StubEnrichmentProvider,
    StubSearchProvider, TestHarness,
};
use prospectrs::presentation::routes;

/// 用完整路由与内存数据库搭建测试服务器
async fn test_server(
    harness: &TestHarness,
    search: Arc<StubSearchProvider>,
    enrichment: Arc<StubEnrichmentProvider>,
) -> TestServer {
    let worker = Arc::new(build_worker(harness, search, enrichment));
    let tuning = Arc::new(build_tuning_service(harness));

    let app = routes::routes()
        .layer(Extension(harness.task_repo.clone()))
        .layer(Extension(harness.mission_repo.clone()))
        .layer(Extension(worker))
        .layer(Extension(tuning));

    TestServer::new(app).expect("failed to build test server")
}

#[tokio::test]
async fn test_health_and_version_endpoints() {
    let harness = setup().await;
    let server = test_server(
        &harness,
        StubSearchProvider::returning(Vec::new()),
        StubEnrichmentProvider::echoing(true),
    )
    .await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    health.assert_text("OK");

    let version = server.get("/v1/version").await;
    version.assert_status_ok();
    assert!(!version.text().is_empty());
}

/// 创建任务会播种第一个流水线单元，触发端点随即处理它
#[tokio::test]
async fn test_mission_create_then_pipeline_run_round_trip() {
    let harness = setup().await;
    let server = test_server(
        &harness,
        StubSearchProvider::returning(found_leads(2)),
        StubEnrichmentProvider::echoing(true),
    )
    .await;

    let response = server
        .post("/v1/missions")
        .json(&json!({
            "organizationId": Uuid::new_v4(),
            "ownerId": Uuid::new_v4(),
            "title": "Fintech CTOs",
            "jobTitle": "CTO",
            "location": "Berlin",
            "industry": "Fintech",
            "autoCampaign": true,
            "dailySearchLimit": 2
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["seededTaskType"], "generate_campaign");

    let run = server.post("/v1/pipeline/run").await;
    run.assert_status_ok();
    let outcome: Value = run.json();
    assert_eq!(outcome["processed"], 1);
    assert_eq!(
        outcome["tasks"][0],
        created["seededTaskId"],
        "the seeded unit should be the one processed"
    );
}

/// 验证失败的任务创建请求返回错误
#[tokio::test]
async fn test_mission_create_rejects_empty_title() {
    let harness = setup().await;
    let server = test_server(
        &harness,
        StubSearchProvider::returning(Vec::new()),
        StubEnrichmentProvider::echoing(true),
    )
    .await;

    let response = server
        .post("/v1/missions")
        .json(&json!({
            "organizationId": Uuid::new_v4(),
            "ownerId": Uuid::new_v4(),
            "title": ""
        }))
        .await;
    assert!(response.status_code().is_client_error());
}

/// 调优读取：未知任务返回404，已知任务返回完整快照
#[tokio::test]
async fn test_tuning_read_endpoint() {
    let harness = setup().await;
    let server = test_server(
        &harness,
        StubSearchProvider::returning(Vec::new()),
        StubEnrichmentProvider::echoing(true),
    )
    .await;

    let missing = server
        .get(&format!("/v1/missions/{}/tuning", Uuid::new_v4()))
        .await;
    missing.assert_status(axum::http::StatusCode::NOT_FOUND);

    let mission = super::helpers::seed_mission(
        &harness,
        prospectrs::domain::models::mission::MissionParams::default(),
    )
    .await;

    let found = server
        .get(&format!("/v1/missions/{}/tuning", mission.id))
        .await;
    found.assert_status_ok();
    let snapshot: Value = found.json();
    assert_eq!(snapshot["mission"]["id"], json!(mission.id));
    assert!(snapshot["metrics"].is_object());
    assert!(snapshot["recommendations"].is_array());
    assert!(snapshot["reasoning"].is_string());
}

/// 调优写入端点钳制越界值并报告补丁结果
#[tokio::test]
async fn test_tuning_write_endpoint_clamps_and_reports() {
    let harness = setup().await;
    let server = test_server(
        &harness,
        StubSearchProvider::returning(Vec::new()),
        StubEnrichmentProvider::echoing(true),
    )
    .await;

    let mission = super::helpers::seed_mission(
        &harness,
        prospectrs::domain::models::mission::MissionParams::default(),
    )
    .await;

    let response = server
        .post(&format!("/v1/missions/{}/tuning", mission.id))
        .json(&json!({
            "updates": {
                "dailySearchLimit": 99,
                "enrichmentLevel": "deep"
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["patchedPendingTasks"], 0);
    assert_eq!(body["mission"]["params"]["dailySearchLimit"], 5);
    assert_eq!(body["mission"]["params"]["enrichmentLevel"], "deep");
}
