//! Integration tests for `OpenApiClient` (search totals and `DataLab` trends).

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kwlens_core::{DocumentVertical, NaverCredentials, TimeUnit, TrendQuery};
use kwlens_naver::{ErrorKind, NaverError, OpenApiClient};

fn creds() -> NaverCredentials {
    NaverCredentials {
        customer_id: "1234567".to_string(),
        api_key: "api-key".to_string(),
        secret_key: "secret-key".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
    }
}

fn test_client(base_url: &str, timeout_secs: u64) -> OpenApiClient {
    OpenApiClient::with_base_url(&creds(), timeout_secs, "kwlens-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Document counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn document_count_returns_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/webkr.json"))
        .and(query_param("query", "커피 머신"))
        .and(header("X-Naver-Client-Id", "client-id"))
        .and(header("X-Naver-Client-Secret", "client-secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({ "total": 48213, "items": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let total = client
        .document_count("커피 머신", DocumentVertical::Web)
        .await
        .expect("should parse total");

    assert_eq!(total, 48213);
}

#[tokio::test]
async fn document_count_uses_blog_vertical() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/blog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "total": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let total = client
        .document_count("coffee", DocumentVertical::Blog)
        .await
        .unwrap();

    assert_eq!(total, 7);
}

#[tokio::test]
async fn document_count_non_success_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/webkr.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let err = client
        .document_count("coffee", DocumentVertical::Web)
        .await
        .unwrap_err();

    assert!(matches!(err, NaverError::UpstreamStatus { status: 429, .. }));
}

#[tokio::test]
async fn document_count_missing_total_is_data_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/webkr.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let err = client
        .document_count("coffee", DocumentVertical::Web)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataShape);
}

#[tokio::test]
async fn document_count_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/webkr.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "total": 1 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .document_count("slow", DocumentVertical::Web)
        .await
        .unwrap_err();

    assert!(
        matches!(err, NaverError::Http(ref e) if e.is_timeout()),
        "expected timeout, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Transport);
}

// ---------------------------------------------------------------------------
// DataLab trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_trend_returns_points_in_upstream_order() {
    let server = MockServer::start().await;

    let body = json!({
        "startDate": "2024-01-01",
        "endDate": "2024-03-31",
        "timeUnit": "month",
        "results": [{
            "title": "coffee",
            "keywords": ["coffee"],
            "data": [
                { "period": "2024-01-01", "ratio": 100.0 },
                { "period": "2024-02-01", "ratio": 83.5 },
                { "period": "2024-03-01", "ratio": 91.25 }
            ]
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .and(header("X-Naver-Client-Id", "client-id"))
        .and(body_partial_json(json!({
            "startDate": "2024-01-01",
            "endDate": "2024-03-31",
            "timeUnit": "month",
            "keywordGroups": [{ "groupName": "coffee", "keywords": ["coffee"] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query = TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 3, 31), TimeUnit::Month)
        .unwrap();
    let points = client.search_trend(&query).await.expect("should parse trend");

    assert_eq!(points.len(), 3);
    assert_eq!(points[0].period, date(2024, 1, 1));
    assert!((points[1].ratio - 83.5).abs() < f64::EPSILON);
    assert_eq!(points[2].period, date(2024, 3, 1));
}

#[tokio::test]
async fn search_trend_with_no_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query =
        TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 1, 31), TimeUnit::Date).unwrap();
    let points = client.search_trend(&query).await.unwrap();

    assert!(points.is_empty());
}

#[tokio::test]
async fn search_trend_non_success_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&json!({ "errorCode": "024" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query =
        TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 1, 31), TimeUnit::Date).unwrap();
    let err = client.search_trend(&query).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn search_trend_bad_period_is_data_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [{ "data": [{ "period": "January", "ratio": 1.0 }] }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query =
        TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 1, 31), TimeUnit::Date).unwrap();
    let err = client.search_trend(&query).await.unwrap_err();

    assert!(matches!(err, NaverError::DataShape { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_trend_missing_results_is_data_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query =
        TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 1, 31), TimeUnit::Date).unwrap();
    let err = client.search_trend(&query).await.unwrap_err();

    assert!(matches!(err, NaverError::DataShape { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_trend_result_without_data_is_data_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/datalab/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "results": [{ "title": "coffee", "keywords": ["coffee"] }] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5);
    let query =
        TrendQuery::new("coffee", date(2024, 1, 1), date(2024, 1, 31), TimeUnit::Date).unwrap();
    let err = client.search_trend(&query).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataShape);
}
