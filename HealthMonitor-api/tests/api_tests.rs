use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveTime;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::Value;
use tower::ServiceExt;

use health_monitor_api::api::create_application;
use health_monitor_api::config::ServerConfig;
use health_monitor_data::fixtures;
use health_monitor_domain::testing::sample_blood_pressure_document;

fn app_for(root: &Path) -> Router {
    let config = ServerConfig {
        data_root: root.to_path_buf(),
        ..ServerConfig::default()
    };
    create_application(&config)
}

async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_classifies_documents_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_document(
        dir.path(),
        &sample_blood_pressure_document("jane_doe", "20250605", &[(118, 76), (128, 78), (139, 85)]),
    )
    .await
    .unwrap();

    let app = app_for(dir.path());

    let (status, body) = send(app.clone(), "/api/v1/blood-pressure/classifications").await;
    assert_eq!(status, StatusCode::OK);
    let classified: Value = serde_json::from_slice(&body).unwrap();
    let labels: Vec<&str> = classified
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Normal", "Elevated", "Hypertension Stage 1"]);

    let (status, body) = send(app, "/api/v1/blood-pressure/notification").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hypertension Stage 1");
}

#[tokio::test]
async fn test_generated_day_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

    let blood_pressure =
        fixtures::generate_blood_pressure_document("john_doe", "20250610", start, 30, &mut rng);
    fixtures::write_document(dir.path(), &blood_pressure).await.unwrap();

    let app = app_for(dir.path());

    let (status, body) = send(app.clone(), "/api/v1/blood-pressure?user=john_doe&date=20250610").await;
    assert_eq!(status, StatusCode::OK);
    let readings: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(readings.as_array().unwrap().len(), 30);

    let (status, body) = send(app.clone(), "/api/v1/blood-pressure/plot?user=john_doe&date=20250610").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..4], b"\x89PNG");

    // The default user has nothing stored in this root
    let (status, _) = send(app, "/api/v1/blood-pressure").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_corrupt_file_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let day = dir.path().join("jane_doe").join("20250605");
    std::fs::create_dir_all(&day).unwrap();
    std::fs::write(day.join("blood_pressure.json"), b"{ not json").unwrap();

    let (status, body) = send(app_for(dir.path()), "/api/v1/blood-pressure/raw-data").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "schema_error");
}

#[tokio::test]
async fn test_health_reports_storage() {
    let dir = tempfile::tempdir().unwrap();

    let (status, _) = send(app_for(dir.path()), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    fixtures::write_document(
        dir.path(),
        &sample_blood_pressure_document("jane_doe", "20250605", &[(120, 75)]),
    )
    .await
    .unwrap();

    let (status, body) = send(app_for(dir.path()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["components"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let response = app_for(dir.path())
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with(mime::APPLICATION_JSON.essence_str()));
}
