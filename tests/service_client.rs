//! AnalyticsClient against an in-process mock of the analytics service

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use orion::panels::{ChartPanel, DatasetStatus, InteractionPanel, ANALYSIS_FAILED};
use orion::service::{AnalyticsClient, AnalyticsService, ServiceConfig, ServiceError};
use serde_json::{json, Value};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn mock_service() -> Router {
    Router::new()
        .route(
            "/analyze",
            post(|Json(body): Json<Value>| async move {
                let query = body["user_query"].as_str().unwrap_or("");
                Json(json!({ "generated_text": format!("You said: {}", query) }))
            }),
        )
        .route(
            "/sentiment",
            post(|Json(body): Json<Value>| async move {
                let label = if body["text"].as_str().unwrap_or("").contains("love") {
                    "positive"
                } else {
                    "negative"
                };
                Json(json!({ "sentiment": label }))
            }),
        )
        .route(
            "/query-trends",
            get(|| async {
                Json(json!([
                    {"date": "2024-01-01", "query_count": 5},
                    {"date": "2024-01-02", "query_count": null}
                ]))
            }),
        )
        .route(
            "/query-category-distribution",
            get(|| async { Json(json!({"detail": "not ready"})) }),
        )
        .route(
            "/user-engagement",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

fn client(base_url: String) -> AnalyticsClient {
    AnalyticsClient::new(ServiceConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_analyze_and_sentiment() {
    let base = spawn(mock_service()).await;
    let client = client(format!("{}/", base));

    assert_eq!(client.analyze("hello").await.unwrap(), "You said: hello");
    assert_eq!(client.sentiment("I love it").await.unwrap(), "positive");
    assert_eq!(client.sentiment("meh").await.unwrap(), "negative");
}

#[tokio::test]
async fn test_read_endpoints_return_raw_json() {
    let base = spawn(mock_service()).await;
    let client = client(base);

    let trends = client.query_trends().await.unwrap();
    assert_eq!(trends.as_array().map(Vec::len), Some(2));

    let categories = client.category_distribution().await.unwrap();
    assert!(categories.is_object());

    match client.user_engagement().await {
        Err(ServiceError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chart_panel_over_http() {
    let base = spawn(mock_service()).await;
    let panel = ChartPanel::mount(Arc::new(client(base)));
    let snapshot = panel.settled().await;

    assert_eq!(snapshot.trends.items.len(), 2);
    assert_eq!(snapshot.trends.items[1].queries, 0);
    assert_eq!(snapshot.categories.status, DatasetStatus::Loaded);
    assert!(snapshot.categories.items.is_empty());
    assert_eq!(snapshot.engagement.status, DatasetStatus::Failed);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route(
        "/analyze",
        post(|| async { Json(json!({"unexpected": true})) }),
    );
    let base = spawn(router).await;

    let err = client(base.clone()).analyze("hi").await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)), "{:?}", err);

    let panel = InteractionPanel::new(Arc::new(client(base)));
    let state = panel.submit_analysis("hi").await;
    assert_eq!(state.response_text, ANALYSIS_FAILED);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_timeout() {
    let router = Router::new().route(
        "/query-trends",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let base = spawn(router).await;
    let client = AnalyticsClient::new(ServiceConfig {
        base_url: base,
        request_timeout_ms: 100,
    })
    .unwrap();

    let err = client.query_trends().await.unwrap_err();
    assert!(matches!(err, ServiceError::Timeout), "{:?}", err);
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr));
    let err = client.sentiment("hi").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unavailable), "{:?}", err);
}
