// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::mission_request::{CreateMissionRequestDto, CreateMissionResponseDto};
use crate::domain::models::mission::{
    normalize_seniority, EnrichmentLevel, Mission, MissionParams,
};
use crate::domain::models::task::{AgentTask, TargetingPayload, TaskPayload};
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::presentation::errors::AppError;

/// 处理任务创建请求
///
/// 持久化任务并播种第一个流水线单元：开启自动活动时播种
/// GENERATE_CAMPAIGN，否则直接播种 SEARCH
///
/// # 返回值
///
/// * `201` - 任务与种子单元已创建
/// * `400` - 请求验证失败
pub async fn create_mission<M, T>(
    Extension(mission_repo): Extension<Arc<M>>,
    Extension(task_repo): Extension<Arc<T>>,
    Json(payload): Json<CreateMissionRequestDto>,
) -> Result<(StatusCode, Json<CreateMissionResponseDto>), AppError>
where
    M: MissionRepository + 'static,
    T: TaskRepository + 'static,
{
    payload.validate()?;

    let params = MissionParams {
        job_title: payload.job_title.clone(),
        location: payload.location.clone(),
        industry: payload.industry.clone(),
        keywords: payload.keywords.clone(),
        company_size: payload.company_size.clone(),
        seniority: normalize_seniority(payload.seniority.iter()),
        enrichment_level: payload
            .enrichment_level
            .as_deref()
            .map(EnrichmentLevel::coerce),
        campaign_name: payload.campaign_name.clone(),
        campaign_context: payload.campaign_context.clone(),
        auto_campaign: payload.auto_campaign,
        daily_search_limit: payload.daily_search_limit,
        daily_enrich_limit: payload.daily_enrich_limit,
        daily_investigate_limit: payload.daily_investigate_limit,
        daily_contact_limit: payload.daily_contact_limit,
    };

    let mission = Mission::new(
        payload.organization_id,
        payload.owner_id,
        payload.title.clone(),
        payload.goal.clone(),
        params,
    );
    let mission = mission_repo.create(&mission).await?;

    let targeting = TargetingPayload {
        mission_title: Some(mission.title.clone()),
        job_title: mission.params.job_title.clone(),
        location: mission.params.location.clone(),
        industry: mission.params.industry.clone(),
        keywords: mission.params.keywords.clone(),
        company_size: mission.params.company_size.clone(),
        seniority: mission.params.seniority.clone(),
        enrichment_level: mission.params.enrichment_level,
        campaign_name: mission.params.campaign_name.clone(),
        campaign_context: mission.params.campaign_context.clone(),
        requested_by: Some(mission.owner_id),
    };

    let seed_payload = if mission.params.auto_campaign {
        TaskPayload::GenerateCampaign(targeting)
    } else {
        TaskPayload::Search(targeting)
    };
    let seed = AgentTask::new(mission.id, mission.organization_id, seed_payload);
    let seed = task_repo.create(&seed).await?;

    info!(
        "mission {} created with seed {} task {}",
        mission.id, seed.task_type, seed.id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateMissionResponseDto {
            mission_id: mission.id,
            seeded_task_id: seed.id,
            seeded_task_type: seed.task_type.to_string(),
        }),
    ))
}
