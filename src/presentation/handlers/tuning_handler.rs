// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::tuning_request::ApplyTuningRequestDto;
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::tuning_service::{TuningService, TuningServiceError};

/// 处理调优读取请求
///
/// 返回任务快照、24小时指标、逐条建议、合并补丁与冲突列表。
/// 只读路径，不触发任何写入
pub async fn get_tuning<M, T>(
    Extension(service): Extension<Arc<TuningService<M, T>>>,
    Path(mission_id): Path<Uuid>,
) -> impl IntoResponse
where
    M: MissionRepository + 'static,
    T: TaskRepository + 'static,
{
    match service.snapshot(mission_id).await {
        Ok(snapshot) => (StatusCode::OK, Json(json!(snapshot))).into_response(),
        Err(e) => {
            let (status, message): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": message }))).into_response()
        }
    }
}

/// 处理调优写入请求
///
/// 仅在操作员显式调用时提交补丁；越界字段被钳制而不是拒绝，
/// 写路径不会因坏输入失败
pub async fn apply_tuning<M, T>(
    Extension(service): Extension<Arc<TuningService<M, T>>>,
    Path(mission_id): Path<Uuid>,
    Json(payload): Json<ApplyTuningRequestDto>,
) -> impl IntoResponse
where
    M: MissionRepository + 'static,
    T: TaskRepository + 'static,
{
    match service.apply(mission_id, &payload.updates).await {
        Ok(outcome) => {
            let snapshot = outcome.snapshot;
            (
                StatusCode::OK,
                Json(json!({
                    "ok": true,
                    "patchedPendingTasks": outcome.patched_pending_tasks,
                    "mission": snapshot.mission,
                    "metrics": snapshot.metrics,
                    "recommendations": snapshot.recommendations,
                    "suggestedPatch": snapshot.suggested_patch,
                    "conflicts": snapshot.conflicts,
                })),
            )
                .into_response()
        }
        Err(e) => {
            let (status, message): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": message }))).into_response()
        }
    }
}

impl From<TuningServiceError> for (StatusCode, String) {
    fn from(err: TuningServiceError) -> Self {
        match err {
            TuningServiceError::MissionNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            TuningServiceError::Repository(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
