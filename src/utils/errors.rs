// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<crate::domain::repositories::task_repository::RepositoryError> for WorkerError {
    fn from(err: crate::domain::repositories::task_repository::RepositoryError) -> Self {
        WorkerError::RepositoryError(err.to_string())
    }
}

impl From<crate::domain::providers::ProviderError> for WorkerError {
    fn from(err: crate::domain::providers::ProviderError) -> Self {
        WorkerError::ProviderError(err.to_string())
    }
}
