// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::lead_repository::LeadRepository;
use crate::domain::repositories::mission_repository::MissionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::usage_repository::UsageRepository;
use crate::workers::pipeline_worker::PipelineWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 按固定间隔触发流水线批处理；HTTP触发端点与后台轮询共用
/// 同一个工作器实例
pub struct WorkerManager<T, M, U, L>
where
    T: TaskRepository + 'static,
    M: MissionRepository + 'static,
    U: UsageRepository + 'static,
    L: LeadRepository + 'static,
{
    worker: Arc<PipelineWorker<T, M, U, L>>,
    poll_interval: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl<T, M, U, L> WorkerManager<T, M, U, L>
where
    T: TaskRepository + Send + Sync,
    M: MissionRepository + Send + Sync,
    U: UsageRepository + Send + Sync,
    L: LeadRepository + Send + Sync,
{
    pub fn new(worker: Arc<PipelineWorker<T, M, U, L>>, poll_interval: Duration) -> Self {
        Self {
            worker,
            poll_interval,
            handles: Vec::new(),
        }
    }

    /// 启动后台轮询
    ///
    /// 每个轮询周期执行一次批处理；批次级错误只记录日志，
    /// 不终止轮询
    pub fn start(&mut self) {
        let worker = self.worker.clone();
        let poll_interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            loop {
                interval.tick().await;
                match worker.run_batch().await {
                    Ok(outcome) if outcome.processed > 0 => {
                        info!("pipeline poll processed {} task(s)", outcome.processed);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("pipeline poll failed: {}", e);
                    }
                }
            }
        });
        self.handles.push(handle);
    }

    /// 等待关闭信号并关闭工作进程
    ///
    /// 监听关闭信号并优雅地关闭所有工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }

        info!("Shutting down workers...");
        for handle in &self.handles {
            handle.abort();
        }

        info!("Workers shut down successfully");
    }
}
