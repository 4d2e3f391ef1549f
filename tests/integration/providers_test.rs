// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prospectrs::config::settings::ProviderEndpointSettings;
use prospectrs::domain::providers::{
    EnrichmentCandidate, EnrichmentProvider, EnrichmentRequest, LeadSearchProvider,
    LeadSearchRequest, ProviderError,
};
use prospectrs::infrastructure::providers::enrichment::EnrichmentClient;
use prospectrs::infrastructure::providers::lead_search::LeadSearchClient;

fn endpoint(base_url: String) -> ProviderEndpointSettings {
    ProviderEndpointSettings {
        base_url,
        api_key: Some("test-key".to_string()),
    }
}

fn search_request() -> LeadSearchRequest {
    LeadSearchRequest {
        job_titles: vec!["CTO".to_string()],
        locations: vec!["Berlin".to_string()],
        industries: vec!["Fintech".to_string()],
        keywords: "payments".to_string(),
        limit: 100,
    }
}

/// 搜索客户端解析上游不统一的字段名（name / company_name 别名）
#[tokio::test]
async fn test_lead_search_client_parses_aliased_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/people/search"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(json!({
            "jobTitles": ["CTO"],
            "locations": ["Berlin"],
            "industries": ["Fintech"],
            "keywords": "payments",
            "limit": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "full_name": "Ada Marsh",
                    "title": "CTO",
                    "organization_name": "Novabank",
                    "email": "ada@novabank.test"
                },
                {
                    "name": "Ben Okafor",
                    "company_name": "Finlay",
                    "linkedin_url": "https://linkedin.com/in/ben-okafor"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LeadSearchClient::new(&endpoint(server.uri()));
    let results = client.search(&search_request()).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].full_name, "Ada Marsh");
    assert_eq!(results[0].organization_name.as_deref(), Some("Novabank"));
    assert_eq!(results[0].email.as_deref(), Some("ada@novabank.test"));
    assert_eq!(results[1].full_name, "Ben Okafor");
    assert_eq!(results[1].organization_name.as_deref(), Some("Finlay"));
    assert_eq!(
        results[1].linkedin_url.as_deref(),
        Some("https://linkedin.com/in/ben-okafor")
    );
}

/// 非成功状态映射为上游错误并带回状态码
#[tokio::test]
async fn test_lead_search_client_maps_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/people/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = LeadSearchClient::new(&endpoint(server.uri()));
    let error = client.search(&search_request()).await.unwrap_err();

    match error {
        ProviderError::UpstreamError { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

/// 丰富化客户端携带鉴权用户头与揭示开关
#[tokio::test]
async fn test_enrichment_client_sends_reveal_flags_and_user_header() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let lead_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/v1/enrich"))
        .and(header("x-api-key", "test-key"))
        .and(header("x-user-id", user_id.to_string().as_str()))
        .and(body_partial_json(json!({
            "revealEmail": true,
            "revealPhone": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enriched": [
                {
                    "id": lead_id,
                    "fullName": "Ada Marsh",
                    "companyName": "Novabank",
                    "email": "ada@novabank.test"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = EnrichmentClient::new(&endpoint(server.uri()));
    let request = EnrichmentRequest {
        leads: vec![EnrichmentCandidate {
            id: lead_id,
            full_name: "Ada Marsh".to_string(),
            linkedin_url: None,
            company_name: Some("Novabank".to_string()),
            title: Some("CTO".to_string()),
            email: None,
        }],
        reveal_email: true,
        reveal_phone: true,
        requested_by: user_id,
    };

    let enriched = client.enrich(&request).await.unwrap();
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].id, lead_id);
    assert_eq!(enriched[0].email.as_deref(), Some("ada@novabank.test"));
}

/// 丰富化上游失败映射为上游错误
#[tokio::test]
async fn test_enrichment_client_maps_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/enrich"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = EnrichmentClient::new(&endpoint(server.uri()));
    let request = EnrichmentRequest {
        leads: Vec::new(),
        reveal_email: true,
        reveal_phone: false,
        requested_by: Uuid::new_v4(),
    };

    let error = client.enrich(&request).await.unwrap_err();
    match error {
        ProviderError::UpstreamError { status, .. } => assert_eq!(status, 500),
        other => panic!("expected upstream error, got {:?}", other),
    }
}
