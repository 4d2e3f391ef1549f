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

use axum::Extension;
use prospectrs::config::settings::Settings;
use prospectrs::domain::providers::{EnrichmentProvider, LeadSearchProvider};
use prospectrs::domain::repositories::activity_repository::ActivityRepository;
use prospectrs::domain::repositories::campaign_repository::CampaignRepository;
use prospectrs::domain::repositories::contacted_lead_repository::ContactedLeadRepository;
use prospectrs::domain::services::tuning_service::TuningService;
use prospectrs::infrastructure::database::connection;
use prospectrs::infrastructure::providers::enrichment::EnrichmentClient;
use prospectrs::infrastructure::providers::lead_search::LeadSearchClient;
use prospectrs::infrastructure::repositories::activity_repo_impl::ActivityRepositoryImpl;
use prospectrs::infrastructure::repositories::campaign_repo_impl::CampaignRepositoryImpl;
use prospectrs::infrastructure::repositories::contacted_lead_repo_impl::ContactedLeadRepositoryImpl;
use prospectrs::infrastructure::repositories::lead_repo_impl::LeadRepositoryImpl;
use prospectrs::infrastructure::repositories::mission_repo_impl::MissionRepositoryImpl;
use prospectrs::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use prospectrs::infrastructure::repositories::usage_repo_impl::UsageRepositoryImpl;
use prospectrs::presentation::routes;
use prospectrs::workers::manager::WorkerManager;
use prospectrs::workers::pipeline_worker::PipelineWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use migration::{Migrator, MigratorTrait};
use prospectrs::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting prospectrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 3. Create database pool and run migrations
    let db_pool = Arc::new(connection::create_pool(&settings.database).await?);
    Migrator::up(db_pool.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Build repositories
    let task_repo = Arc::new(TaskRepositoryImpl::new(db_pool.clone()));
    let mission_repo = Arc::new(MissionRepositoryImpl::new(db_pool.clone()));
    let usage_repo = Arc::new(UsageRepositoryImpl::new(db_pool.clone()));
    let lead_repo = Arc::new(LeadRepositoryImpl::new(db_pool.clone()));
    let campaign_repo: Arc<dyn CampaignRepository> =
        Arc::new(CampaignRepositoryImpl::new(db_pool.clone()));
    let contacted_repo: Arc<dyn ContactedLeadRepository> =
        Arc::new(ContactedLeadRepositoryImpl::new(db_pool.clone()));
    let activity_repo: Arc<dyn ActivityRepository> =
        Arc::new(ActivityRepositoryImpl::new(db_pool.clone()));

    // 5. Build provider clients
    let search_provider: Arc<dyn LeadSearchProvider> =
        Arc::new(LeadSearchClient::new(&settings.providers.lead_search));
    let enrichment_provider: Arc<dyn EnrichmentProvider> =
        Arc::new(EnrichmentClient::new(&settings.providers.enrichment));

    // 6. Build the pipeline worker and tuning service
    let pipeline_worker = Arc::new(PipelineWorker::new(
        task_repo.clone(),
        mission_repo.clone(),
        usage_repo.clone(),
        lead_repo.clone(),
        campaign_repo.clone(),
        contacted_repo.clone(),
        activity_repo.clone(),
        search_provider.clone(),
        enrichment_provider.clone(),
        settings.worker.batch_size,
    ));

    let tuning_service = Arc::new(TuningService::new(
        mission_repo.clone(),
        task_repo.clone(),
        lead_repo.clone(),
        contacted_repo.clone(),
        activity_repo.clone(),
    ));

    // 7. Start the background poller when enabled
    let mut worker_manager = WorkerManager::new(
        pipeline_worker.clone(),
        Duration::from_secs(settings.worker.poll_interval_secs),
    );
    if settings.worker.enabled {
        worker_manager.start();
        info!(
            "Pipeline poller started, interval {}s",
            settings.worker.poll_interval_secs
        );
    }

    // 8. Build the router with shared state
    let app = routes::routes()
        .layer(Extension(settings.clone()))
        .layer(Extension(task_repo))
        .layer(Extension(mission_repo))
        .layer(Extension(pipeline_worker))
        .layer(Extension(tuning_service))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // 9. Serve
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = worker_manager.wait_for_shutdown() => {}
    }

    Ok(())
}
