//! Throwaway prediction backend for integration tests
//!
//! Binds an axum app to an ephemeral port and records what it receives so
//! tests can assert on calls the SmartYield server makes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use smartyield_server::{create_app, external::YieldApiClient, AppState, Config};

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
pub struct FakeBackend {
    pub predict_fails: AtomicBool,
    pub advice_fails: AtomicBool,
    /// 200 responses whose body is not a usable prediction/advice
    pub predict_malformed: AtomicBool,
    pub advice_malformed: AtomicBool,
    pub predict_calls: AtomicUsize,
    pub advice_calls: AtomicUsize,
    pub options_calls: AtomicUsize,
    pub lifecycle_calls: AtomicUsize,
    pub last_predict_body: Mutex<Option<Value>>,
    pub last_lifecycle_auth: Mutex<Option<String>>,
}

pub fn prediction_body() -> Value {
    json!({
        "predicted_yield": 4.2,
        "unit": "tons_per_hectare",
        "confidence": 0.8,
        "baseline_yield": 3.2,
        "historical_yields": [{"season": "Rabi 2023", "yield_t_per_ha": 3.1}],
        "risk_alerts": [],
        "recommended_practices": ["Mulch between rows"],
        "weather_outlook": {
            "summary": "Mild season",
            "rainfallOutlook": "Normal",
            "temperatureTrend": "Stable"
        }
    })
}

pub fn advice_body() -> Value {
    json!({
        "knowledge_base": [{
            "title": "Mulching",
            "summary": "Keep soil moisture steady",
            "actions": ["Apply straw mulch"],
            "category": "water"
        }]
    })
}

pub fn options_body() -> Value {
    json!({
        "crops": [{"id": "rice", "name": "Paddy", "duration": "120 days"}],
        "soils": [{"id": "black", "name": "Black cotton", "suitability": "Cotton"}],
        "irrigation": [{"id": "drip", "name": "Drip", "waterUse": "Low"}]
    })
}

async fn predict(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    backend.predict_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_predict_body.lock().unwrap() = Some(body);
    if backend.predict_fails.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Model offline"})),
        )
            .into_response();
    }
    if backend.predict_malformed.load(Ordering::SeqCst) {
        return "not json".into_response();
    }
    Json(prediction_body()).into_response()
}

async fn advice(State(backend): State<Arc<FakeBackend>>, Json(_body): Json<Value>) -> Response {
    backend.advice_calls.fetch_add(1, Ordering::SeqCst);
    if backend.advice_fails.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "advice engine down").into_response();
    }
    if backend.advice_malformed.load(Ordering::SeqCst) {
        return Json(json!({"knowledge_base": "missing"})).into_response();
    }
    Json(advice_body()).into_response()
}

pub fn lifecycle_body() -> Value {
    json!({
        "crop_type": "wheat",
        "crop_name": "Wheat",
        "planting_date": "2024-11-01",
        "harvest_date": "2025-03-21",
        "total_duration_days": 140,
        "current_stage": "Tillering",
        "current_day": 35,
        "location": "Ludhiana",
        "stages": [{
            "stage_name": "Germination",
            "start_date": "2024-11-01",
            "end_date": "2024-11-10",
            "duration_days": 10,
            "description": "Seed emergence",
            "care_activities": ["Light irrigation"],
            "irrigation_frequency": "Critical - every 3 days",
            "fertilizer_recommendations": ["Basal DAP"],
            "weather_considerations": "Avoid waterlogging",
            "risk_factors": []
        }],
        "weather_alerts": [],
        "irrigation_schedule": [{
            "stage": "Germination",
            "period": "Nov 01 - Nov 10",
            "frequency": "Critical - every 3 days",
            "recommendation": "Critical - every 3 days",
            "is_critical": true
        }],
        "fertilizer_schedule": [{
            "date": "2024-11-01",
            "stage": "Germination",
            "fertilizer": "Basal DAP",
            "timing": "Day 0"
        }],
        "general_care_tips": ["Scout twice a week"],
        "harvest_readiness_indicators": ["Golden grain"]
    })
}

async fn lifecycle(
    State(backend): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.lifecycle_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_lifecycle_auth.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    if body["crop_type"] == "sugarcane" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "No calendar for sugarcane in this region"})),
        )
            .into_response();
    }
    Json(lifecycle_body()).into_response()
}

async fn options(State(backend): State<Arc<FakeBackend>>) -> Json<Value> {
    backend.options_calls.fetch_add(1, Ordering::SeqCst);
    Json(options_body())
}

async fn me(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {}", GOOD_TOKEN);
    match headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
        Some(value) if value == expected => {
            Json(json!({"id": 7, "email": "farmer@example.com", "name": "Asha"})).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response(),
    }
}

async fn echo(
    method: Method,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let payload = json!({
        "method": method.as_str(),
        "path": rest,
        "query": query,
        "authorization": headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()),
        "contentType": headers.get("content-type").and_then(|h| h.to_str().ok()),
        "body": body,
    });
    (status, Json(payload)).into_response()
}

async fn missing() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response()
}

async fn plain_text() -> &'static str {
    "definitely not json"
}

/// Start the fake backend; returns its base URL
pub async fn spawn_backend(backend: Arc<FakeBackend>) -> String {
    let app = Router::new()
        .route("/api/yield/predict", post(predict))
        .route("/api/advice", post(advice))
        .route("/api/reference/options", get(options))
        .route("/api/crop-lifecycle/generate", post(lifecycle))
        .route("/api/auth/me", get(me))
        .route(
            "/api/echo/*rest",
            get(echo).post(echo).put(echo).delete(echo),
        )
        .route("/api/missing", get(missing))
        .route("/api/plain", get(plain_text))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL nothing is listening on
pub async fn dead_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn server_for(base_url: &str) -> Router {
    let state = AppState::with_client(Config::default(), YieldApiClient::with_base_url(base_url));
    create_app(state)
}

/// Send one request through the router; returns status and JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
