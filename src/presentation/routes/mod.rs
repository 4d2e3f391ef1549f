// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::lead_repo_impl::LeadRepositoryImpl;
use crate::infrastructure::repositories::mission_repo_impl::MissionRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::infrastructure::repositories::usage_repo_impl::UsageRepositoryImpl;
use crate::presentation::handlers::{mission_handler, pipeline_handler, tuning_handler};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/v1/missions",
            post(mission_handler::create_mission::<MissionRepositoryImpl, TaskRepositoryImpl>),
        )
        .route(
            "/v1/pipeline/run",
            post(
                pipeline_handler::run_pipeline::<
                    TaskRepositoryImpl,
                    MissionRepositoryImpl,
                    UsageRepositoryImpl,
                    LeadRepositoryImpl,
                >,
            ),
        )
        .route(
            "/v1/missions/{id}/tuning",
            get(tuning_handler::get_tuning::<MissionRepositoryImpl, TaskRepositoryImpl>).post(
                tuning_handler::apply_tuning::<MissionRepositoryImpl, TaskRepositoryImpl>,
            ),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
