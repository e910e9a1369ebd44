use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use flightsep_core::{AnalysisConfig, AnalysisEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, state::AppState};

fn setup_app() -> (axum::Router, Arc<AppState>) {
    let engine = AnalysisEngine::new(AnalysisConfig {
        horizon_padding_seconds: 1800.0,
        ..Default::default()
    })
    .expect("valid config");
    let state = Arc::new(AppState::new(engine));
    let app = api::routes().with_state(state.clone());
    (app, state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-request-id", "test-request")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn mock_flights() -> Value {
    json!([
        {
            "ACID": "F1",
            "route": "45.0N/75.0W 46.0N/74.0W",
            "departure time": 1700000000,
            "aircraft speed": 450,
            "altitude": 30000
        },
        {
            "ACID": "F2",
            "route": "45.02N/75.02W 46.02N/74.02W",
            "departure time": "1700000000",
            "aircraft speed": 455,
            "altitude": 30000
        }
    ])
}

#[tokio::test]
async fn analyze_returns_conflicts_and_hotspots() {
    let (app, state) = setup_app();

    let response = app
        .oneshot(post_json("/analyze", mock_flights()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request"
    );

    let body = read_json(response).await;
    let conflicts = body["conflicts"].as_array().expect("conflicts array");
    assert!(!conflicts.is_empty());
    assert_eq!(conflicts[0]["flight_id_a"], "F1");
    assert_eq!(conflicts[0]["time_epoch"], 1700000000.0);
    assert!(conflicts[0]["horizontal_distance_nm"].as_f64().unwrap() < 5.0);
    assert!(!body["hotspots"].as_array().unwrap().is_empty());
    assert_eq!(state.analyses_run(), 1);
}

#[tokio::test]
async fn analyze_empty_list_is_empty_result() {
    let (app, _state) = setup_app();

    let response = app.oneshot(post_json("/v1/analyze", json!([]))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({"conflicts": [], "hotspots": []}));
}

#[tokio::test]
async fn analyze_rejects_non_list_body() {
    let (app, _state) = setup_app();

    let response = app
        .oneshot(post_json("/analyze", json!({"ACID": "F1"})))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn waypoints_lists_flights_per_token() {
    let (app, _state) = setup_app();

    let response = app
        .oneshot(post_json(
            "/v1/waypoints",
            json!([
                {"ACID": "A1", "route": "45N/75W 46N/74W"},
                {"ACID": "B2", "route": "46N/74W"}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["46N/74W"], json!(["A1", "B2"]));
    assert_eq!(body["45N/75W"], json!(["A1"]));
}

#[tokio::test]
async fn exposes_active_config() {
    let (app, _state) = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = read_json(response).await;
    assert_eq!(body["horizon_padding_seconds"], 1800.0);
    assert_eq!(body["execution"], "sequential");
}
