//! Functional tests for the HTTP routes.
//!
//! These drive the axum router directly with `oneshot`, going through the
//! handlers, the dashboard service and the on-disk history log.

#![cfg(feature = "http-server")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use ecoaqi::config::PathSettings;
use ecoaqi::http::{create_router, AppState};
use ecoaqi::io::save_model;
use ecoaqi::models::AqiModel;
use ecoaqi::services::DashboardService;

/// 25a + 60b + 2c + d = 85 at the slider defaults.
fn reference_model() -> AqiModel {
    AqiModel::new([1.0, 0.5, 5.0], 20.0)
}

fn app(dir: &TempDir) -> (Router, PathSettings) {
    let paths = PathSettings::under(dir.path());
    save_model(paths.model_file(), &reference_model()).unwrap();
    let dashboard = DashboardService::load(&paths).unwrap();
    (create_router(AppState::new(dashboard)), paths)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_predict(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// =========================================================
// Page and health
// =========================================================

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("EcoAQI"));
    assert!(html.contains("id=\"temperature\" min=\"0\" max=\"50\""));
    assert!(html.contains("/v1/history/download"));
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["model_file"],
        paths.model_file().display().to_string()
    );
}

// =========================================================
// Status and model
// =========================================================

#[tokio::test]
async fn test_status_cards() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);

    let (status, body) =
        get_json(&app, "/v1/status?temperature=36.456&humidity=80&wind_speed=7").await;
    assert_eq!(status, StatusCode::OK);

    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["label"], "UNSAFE");
    assert_eq!(cards[0]["value"], 36.46);
    assert_eq!(cards[1]["label"], "SAFE");
    assert_eq!(cards[2]["label"], "UNSAFE");
}

#[tokio::test]
async fn test_status_defaults_to_slider_values() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);
    let (_, body) = get_json(&app, "/v1/status").await;
    assert_eq!(body["conditions"]["temperature"], 25.0);
    assert!(body["cards"].as_array().unwrap().iter().all(|c| c["safe"] == true));
}

#[tokio::test]
async fn test_inputs_bounds() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);
    let (_, body) = get_json(&app, "/v1/inputs").await;
    assert_eq!(body["humidity"]["max"], 100.0);
    assert_eq!(body["wind_speed"]["default"], 2.0);
}

#[tokio::test]
async fn test_model_explanation() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);
    let (status, body) = get_json(&app, "/v1/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intercept"], 20.0);
    assert_eq!(body["influences"][0]["feature"], "temperature");
    assert_eq!(body["influences"][0]["effect"], "increases");
}

// =========================================================
// Prediction and history
// =========================================================

#[tokio::test]
async fn test_predict_reference_scenario() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);

    let (status, body) = post_predict(
        &app,
        json!({"temperature": 25.0, "humidity": 60.0, "wind_speed": 2.0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"]["aqi"], 85.0);
    assert_eq!(body["prediction"]["category"], "Moderate");
    assert_eq!(
        body["prediction"]["health_impact"],
        "Minor discomfort to sensitive groups."
    );
    assert_eq!(body["prediction"]["action"], "Limit prolonged outdoor activity.");
    assert_eq!(body["record"]["AQI"], 85.0);

    let content = fs::read_to_string(&paths.history_file).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[tokio::test]
async fn test_predict_out_of_range_inputs_are_not_rejected() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);

    let (status, body) = post_predict(
        &app,
        json!({"temperature": 500.0, "humidity": 60.0, "wind_speed": 2.0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"]["category"], "Hazardous");
}

#[tokio::test]
async fn test_predict_rejects_malformed_body() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);
    let request = Request::builder()
        .method("POST")
        .uri("/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"temperature\": \"warm\"}"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("deserialize"));
}

#[tokio::test]
async fn test_predict_without_json_content_type_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);
    let request = Request::builder()
        .method("POST")
        .uri("/v1/predict")
        .body(Body::from(
            json!({"temperature": 25.0, "humidity": 60.0, "wind_speed": 2.0}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    // nothing was recorded
    let content = fs::read_to_string(&paths.history_file).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[tokio::test]
async fn test_history_after_predictions() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);

    for t in [10.0, 20.0, 30.0] {
        post_predict(&app, json!({"temperature": t, "humidity": 60.0, "wind_speed": 2.0})).await;
    }

    let (status, view) = get_json(&app, "/v1/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total_records"], 3);
    assert_eq!(view["trend"].as_array().unwrap().len(), 3);
    assert!(view["selected_date"].is_string());

    let content = fs::read_to_string(&paths.history_file).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[tokio::test]
async fn test_history_filter_by_date() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);
    fs::write(
        &paths.history_file,
        "Time,Temperature,Humidity,Wind Speed,AQI,Category,Health Impact,Action\n\
         2024-03-01 09:00:00,25.0,60.0,2.0,85.0,Moderate,Minor discomfort to sensitive groups.,Limit prolonged outdoor activity.\n\
         2024-03-02 09:00:00,30.0,60.0,2.0,90.0,Moderate,Minor discomfort to sensitive groups.,Limit prolonged outdoor activity.\n\
         2024-03-02 18:30:00,10.0,40.0,5.0,40.0,Good,Air quality is satisfactory.,No action required.\n",
    )
    .unwrap();

    let (_, view) = get_json(&app, "/v1/history").await;
    assert_eq!(view["selected_date"], "2024-03-02");
    assert_eq!(view["records"].as_array().unwrap().len(), 2);

    let (_, view) = get_json(&app, "/v1/history?date=2024-03-01").await;
    let records = view["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Time"], "2024-03-01 09:00:00");

    let (status, view) = get_json(&app, "/v1/history?date=2030-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert!(view["records"].as_array().unwrap().is_empty());
    assert_eq!(view["trend"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_history_empty_log() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir);
    let (status, view) = get_json(&app, "/v1/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total_records"], 0);
    assert!(view["selected_date"].is_null());
}

#[tokio::test]
async fn test_malformed_history_is_server_error() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);
    fs::write(
        &paths.history_file,
        "Time,Temperature,Humidity,Wind Speed,AQI,Category,Health Impact,Action\nnot-a-time,a,b,c,d,e,f,g\n",
    )
    .unwrap();

    let (status, body) = get_json(&app, "/v1/history").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "HISTORY_ERROR");
}

#[tokio::test]
async fn test_download_is_full_csv() {
    let dir = TempDir::new().unwrap();
    let (app, paths) = app(&dir);
    post_predict(&app, json!({"temperature": 25.0, "humidity": 60.0, "wind_speed": 2.0})).await;

    let request = Request::builder()
        .uri("/v1/history/download")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("aqi_history.csv"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let on_disk = fs::read(&paths.history_file).unwrap();
    assert_eq!(body.to_vec(), on_disk);
}
