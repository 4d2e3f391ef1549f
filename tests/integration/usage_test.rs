// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use uuid::Uuid;

use super::helpers::setup;
use prospectrs::domain::models::usage::UsageKind;
use prospectrs::domain::repositories::usage_repository::UsageRepository;

/// 首次读取惰性创建零值账本行，且同日重复读取拿到同一行
#[tokio::test]
async fn test_get_or_create_is_lazy_and_stable() {
    let harness = setup().await;
    let org = Uuid::new_v4();
    let today = Utc::now().date_naive();

    let first = harness.usage_repo.get_or_create(org, today).await.unwrap();
    assert_eq!(first.search_runs, 0);
    assert_eq!(first.leads_searched, 0);
    assert_eq!(first.leads_enriched, 0);
    assert_eq!(first.leads_investigated, 0);

    let second = harness.usage_repo.get_or_create(org, today).await.unwrap();
    assert_eq!(second.id, first.id);
}

/// 条件递增在上限内生效、越限拒绝，计数器只增不减
#[tokio::test]
async fn test_try_consume_respects_limit() {
    let harness = setup().await;
    let org = Uuid::new_v4();
    let today = Utc::now().date_naive();

    // 20 + 20 + 10 = 50，第三次把额度吃满
    for amount in [20, 20, 10] {
        let applied = harness
            .usage_repo
            .try_consume(org, today, UsageKind::LeadsEnriched, amount, 50)
            .await
            .unwrap();
        assert!(applied);
    }

    // 满额之后任何递增都被拒绝
    let rejected = harness
        .usage_repo
        .try_consume(org, today, UsageKind::LeadsEnriched, 1, 50)
        .await
        .unwrap();
    assert!(!rejected);

    let usage = harness.usage_repo.get_or_create(org, today).await.unwrap();
    assert_eq!(usage.leads_enriched, 50);
}

/// 超出剩余量的单次递增整体拒绝，不部分入账
#[tokio::test]
async fn test_try_consume_rejects_overshoot_whole() {
    let harness = setup().await;
    let org = Uuid::new_v4();
    let today = Utc::now().date_naive();

    let applied = harness
        .usage_repo
        .try_consume(org, today, UsageKind::LeadsInvestigated, 18, 20)
        .await
        .unwrap();
    assert!(applied);

    // 剩2，尝试加5：拒绝且计数不动
    let rejected = harness
        .usage_repo
        .try_consume(org, today, UsageKind::LeadsInvestigated, 5, 20)
        .await
        .unwrap();
    assert!(!rejected);

    let usage = harness.usage_repo.get_or_create(org, today).await.unwrap();
    assert_eq!(usage.leads_investigated, 18);
}

/// 搜索记账单条语句同时推进两个计数器，且受次数上限约束
#[tokio::test]
async fn test_record_search_advances_both_counters_under_limit() {
    let harness = setup().await;
    let org = Uuid::new_v4();
    let today = Utc::now().date_naive();

    let first = harness
        .usage_repo
        .record_search(org, today, 7, 2)
        .await
        .unwrap();
    assert!(first);
    let second = harness
        .usage_repo
        .record_search(org, today, 4, 2)
        .await
        .unwrap();
    assert!(second);

    // 次数到2后第三次拒绝，线索计数也不再变化
    let third = harness
        .usage_repo
        .record_search(org, today, 9, 2)
        .await
        .unwrap();
    assert!(!third);

    let usage = harness.usage_repo.get_or_create(org, today).await.unwrap();
    assert_eq!(usage.search_runs, 2);
    assert_eq!(usage.leads_searched, 11);
}

/// 不同组织与不同日期的账本互相独立
#[tokio::test]
async fn test_ledgers_are_scoped_per_org_and_day() {
    let harness = setup().await;
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();
    let today = Utc::now().date_naive();
    let yesterday = today.pred_opt().unwrap();

    harness
        .usage_repo
        .try_consume(org_a, today, UsageKind::SearchRuns, 2, 5)
        .await
        .unwrap();
    harness
        .usage_repo
        .try_consume(org_a, yesterday, UsageKind::SearchRuns, 3, 5)
        .await
        .unwrap();

    let a_today = harness.usage_repo.get_or_create(org_a, today).await.unwrap();
    let a_yesterday = harness
        .usage_repo
        .get_or_create(org_a, yesterday)
        .await
        .unwrap();
    let b_today = harness.usage_repo.get_or_create(org_b, today).await.unwrap();

    assert_eq!(a_today.search_runs, 2);
    assert_eq!(a_yesterday.search_runs, 3);
    assert_eq!(b_today.search_runs, 0);
}
