// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::settings::ProviderEndpointSettings;
use crate::domain::providers::{
    EnrichedLead, EnrichmentCandidate, EnrichmentProvider, EnrichmentRequest, ProviderError,
};

/// 丰富化请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnrichRequestBody<'a> {
    leads: &'a [EnrichmentCandidate],
    reveal_email: bool,
    reveal_phone: bool,
}

/// 丰富化响应体
#[derive(Debug, Deserialize)]
struct EnrichResponseBody {
    #[serde(default)]
    enriched: Vec<EnrichedLead>,
}

/// 丰富化供应商HTTP客户端
pub struct EnrichmentClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EnrichmentClient {
    /// 创建新的丰富化客户端
    pub fn new(settings: &ProviderEndpointSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
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
impl EnrichmentProvider for EnrichmentClient {
    async fn enrich(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<Vec<EnrichedLead>, ProviderError> {
        let url = format!("{}/v1/enrich", self.base_url);
        let body = EnrichRequestBody {
            leads: &request.leads,
            reveal_email: request.reveal_email,
            reveal_phone: request.reveal_phone,
        };

        let mut req = self
            .client
            .post(&url)
            .header("x-user-id", request.requested_by.to_string())
            .json(&body);
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

        let body: EnrichResponseBody = response
            .json()
            .await
            .map_err(|e| ProviderError::DecodeError(e.to_string()))?;

        info!(
            "enrichment returned {} of {} requested lead(s)",
            body.enriched.len(),
            request.leads.len()
        );

        Ok(body.enriched)
    }

    fn name(&self) -> &'static str {
        "enrichment"
    }
}
