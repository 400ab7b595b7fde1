use axum::http::{header, StatusCode};

use health_monitor_data::models::HealthDomain;
use health_monitor_data::repository::{InMemorySeriesRepository, SeriesKey};
use health_monitor_domain::testing::sample_blood_pressure_document;

use super::{app_with, get, get_json};

fn repo_with(readings: &[(i32, i32)]) -> InMemorySeriesRepository {
    let repo = InMemorySeriesRepository::new();
    repo.insert_document(&sample_blood_pressure_document("jane_doe", "20250605", readings))
        .unwrap();
    repo
}

#[tokio::test]
async fn test_classifications_follow_each_reading() {
    let app = app_with(repo_with(&[(120, 75), (135, 82), (145, 95)]));

    let (status, body) = get_json(app, "/api/v1/blood-pressure/classifications").await;
    assert_eq!(status, StatusCode::OK);

    let labels: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Elevated", "Hypertension Stage 1", "Hypertension Stage 2"]);
    assert_eq!(body[0]["category"], "elevated");
    assert_eq!(body[0]["time"], "080000");
}

#[tokio::test]
async fn test_notification_is_plain_text_label() {
    let app = app_with(repo_with(&[(120, 75), (135, 82), (145, 95)]));

    let (status, headers, body) = get(app, "/api/v1/blood-pressure/notification").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(String::from_utf8(body).unwrap(), "Hypertension Stage 2");
}

#[tokio::test]
async fn test_notification_policy() {
    let repo = repo_with(&[(160, 100), (115, 70)]);

    let (_, _, last) = get(app_with(repo.clone()), "/api/v1/blood-pressure/notification").await;
    assert_eq!(String::from_utf8(last).unwrap(), "Normal");

    let (_, _, worst) = get(
        app_with(repo.clone()),
        "/api/v1/blood-pressure/notification?policy=most_severe",
    )
    .await;
    assert_eq!(String::from_utf8(worst).unwrap(), "Hypertension Stage 2");

    let (status, body) =
        get_json(app_with(repo), "/api/v1/blood-pressure/notification?policy=average").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_empty_series_has_no_notification() {
    let app = app_with(repo_with(&[]));

    let (status, body) = get_json(app.clone(), "/api/v1/blood-pressure/notification").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no_data");

    // An empty day still classifies to an empty list
    let (status, body) = get_json(app, "/api/v1/blood-pressure/classifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_user_and_bad_date() {
    let app = app_with(repo_with(&[(120, 75)]));

    let (status, body) = get_json(app.clone(), "/api/v1/blood-pressure?user=john_doe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = get_json(app.clone(), "/api/v1/blood-pressure?date=20250631").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["date"].is_array());

    let (status, _) = get_json(app, "/api/v1/blood-pressure?user=..%2Fetc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_reading_rejects_series() {
    let repo = InMemorySeriesRepository::new();
    repo.insert_raw(
        SeriesKey::new("jane_doe", "20250605").unwrap(),
        HealthDomain::BloodPressure,
        r#"{"metadata":{"username":"jane_doe","healthDomain":"blood-pressure","date":"20250605"},
            "timeseries":[{"time":"080000","data":{"systolic":120,"diastolic":75,"average":90}},
                          {"time":"080100","data":{"systolic":130,"average":95}}]}"#,
    )
    .unwrap();

    let (status, body) = get_json(app_with(repo), "/api/v1/blood-pressure/classifications").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "malformed_observation");
    assert_eq!(body["details"]["index"], 1);
}

#[tokio::test]
async fn test_readings_and_timeseries() {
    let app = app_with(repo_with(&[(120, 75), (135, 82)]));

    let (status, readings) = get_json(app.clone(), "/api/v1/blood-pressure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(readings[1]["systolic"], 135);
    assert_eq!(readings[1]["diastolic"], 82);
    assert!(readings[1].get("time").is_none());

    let (_, entries) = get_json(app.clone(), "/api/v1/blood-pressure/timeseries").await;
    assert_eq!(entries[1]["time"], "080100");
    assert_eq!(entries[1]["data"]["systolic"], 135);

    let (_, document) = get_json(app, "/api/v1/blood-pressure/raw-data").await;
    assert_eq!(document["metadata"]["healthDomain"], "blood-pressure");
}

#[tokio::test]
async fn test_plot_data_and_png() {
    let app = app_with(repo_with(&[(120, 75), (135, 82), (145, 95)]));

    let (status, plot) = get_json(app.clone(), "/api/v1/blood-pressure/plot-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plot["labels"][0], "8:00 AM");
    assert_eq!(plot["labels"][1], "");
    assert_eq!(plot["label_indexes"], serde_json::json!([0]));
    assert_eq!(plot["latest"]["systolic"], 145);

    let (status, headers, body) = get(app, "/api/v1/blood-pressure/plot").await;
    assert_eq!(status, StatusCode::OK);
    let content_type: mime::Mime = headers[header::CONTENT_TYPE].to_str().unwrap().parse().unwrap();
    assert_eq!(content_type, mime::IMAGE_PNG);
    assert_eq!(&body[..4], b"\x89PNG");
}
