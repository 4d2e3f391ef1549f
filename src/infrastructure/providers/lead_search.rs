// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::config::settings::ProviderEndpointSettings;
use crate::domain::providers::{FoundLead, LeadSearchProvider, LeadSearchRequest, ProviderError};

/// 线索搜索响应体
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Vec<FoundLead>,
}

/// 线索搜索供应商HTTP客户端
pub struct LeadSearchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LeadSearchClient {
    /// 创建新的搜索客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 供应商端点配置
    pub fn new(settings: &ProviderEndpointSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl LeadSearchProvider for LeadSearchClient {
    async fn search(&self, request: &LeadSearchRequest) -> Result<Vec<FoundLead>, ProviderError> {
        let url = format!("{}/v1/people/search", self.base_url);

        let mut req = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| ProviderError::DecodeError(e.to_string()))?;

        info!(
            "lead search returned {} result(s) for {} title filter(s)",
            body.results.len(),
            request.job_titles.len()
        );

        Ok(body.results)
    }

    fn name(&self) -> &'static str {
        "lead_search"
    }
}
