mod blood_pressure_test;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use health_monitor_data::repository::InMemorySeriesRepository;

use crate::api::routes::create_app;
use crate::api::state::AppState;
use crate::config::ServerConfig;

/// Router over an in-memory repository with default configuration
pub(crate) fn app_with(repo: InMemorySeriesRepository) -> Router {
    let config = ServerConfig::default();
    create_app(AppState::with_source(repo, &config), &config.cors_origins)
}

/// Send a GET request and collect the response
pub(crate) async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

/// Send a GET request and parse the JSON body
pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
