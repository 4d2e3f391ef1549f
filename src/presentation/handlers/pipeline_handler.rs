// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::domain::repositories::lead_repository::LeadRepository;
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::usage_repository::UsageRepository;
use crate::workers::pipeline_worker::PipelineWorker;

/// 处理流水线触发请求
///
/// 无状态触发：执行一次批处理并返回处理结果。批次拉取失败
/// 是唯一的致命路径，以服务器错误返回；单元级失败已按单元
/// 落库，不影响响应
///
/// # 返回值
///
/// * `200 {processed, tasks}` - 批处理完成
/// * `500 {error}` - 批次拉取失败
pub async fn run_pipeline<T, M, U, L>(
    Extension(worker): Extension<Arc<PipelineWorker<T, M, U, L>>>,
) -> impl IntoResponse
where
    T: TaskRepository + 'static,
    M: MissionRepository + 'static,
    U: UsageRepository + 'static,
    L: LeadRepository + 'static,
{
    match worker.run_batch().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({ "processed": outcome.processed, "tasks": outcome.tasks })),
        )
            .into_response(),
        Err(e) => {
            error!("pipeline batch aborted: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
