//! Client for the SmartYield prediction backend
//!
//! Wraps the yield, advice, reference, calendar and account endpoints plus the raw
//! forwarding used by the `/api` proxy.

use reqwest::{header::AUTHORIZATION, header::CONTENT_TYPE, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use shared::models::{
    AdviceApiResponse, AdviceRequest, AdviceResponse, CropLifecycle, FarmerPayload,
    LifecycleRequest, PredictionApiResponse, ReferenceOptions, YieldPrediction,
};

use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};

/// Why a backend call did not produce a usable value
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("backend unreachable: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Calls the orchestrators depend on
#[axum::async_trait]
pub trait YieldApi: Send + Sync {
    async fn predict(
        &self,
        payload: &FarmerPayload,
        authorization: Option<&str>,
    ) -> Result<YieldPrediction, UpstreamError>;

    async fn advice(
        &self,
        request: &AdviceRequest,
        authorization: Option<&str>,
    ) -> Result<AdviceResponse, UpstreamError>;

    async fn reference_options(&self) -> Result<ReferenceOptions, UpstreamError>;

    /// `POST /api/crop-lifecycle/generate`
    async fn crop_lifecycle(
        &self,
        request: &LifecycleRequest,
        authorization: Option<&str>,
    ) -> Result<CropLifecycle, UpstreamError>;

    /// `GET /api/auth/me`; the profile is passed through untouched
    async fn current_user(&self, authorization: &str) -> Result<Value, UpstreamError>;
}

/// Prediction backend client
#[derive(Clone)]
pub struct YieldApiClient {
    client: Client,
    base_url: String,
}

/// Status and JSON body relayed by the proxy
#[derive(Debug)]
pub struct ForwardedResponse {
    pub status: u16,
    pub body: Value,
}

impl YieldApiClient {
    /// Create a client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Forward a request to `{base}/api/{path}{?query}` with a JSON content
    /// type and the caller's Authorization header verbatim
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<ForwardedResponse, UpstreamError> {
        let mut url = self.url(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let body = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Decode(format!("non-JSON body: {}", e)))?;

        Ok(ForwardedResponse { status, body })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, UpstreamError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(auth) = authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        decode_response(response).await
    }
}

/// Check the status, then parse the body as `T`
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::Transport(e.to_string()))?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes);
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            message: extract_error_message(status.as_u16(), status.canonical_reason(), &body),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}

/// Best human-readable message from a failed response body: a JSON string,
/// then `detail`, then `message`, then the raw text, then "<status> <reason>"
pub fn extract_error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match &json {
            Value::String(text) if !text.is_empty() => return text.clone(),
            Value::Object(map) => {
                for key in ["detail", "message"] {
                    if let Some(Value::String(text)) = map.get(key) {
                        if !text.is_empty() {
                            return text.clone();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    match reason {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, UpstreamError> {
    serde_json::to_value(value).map_err(|e| UpstreamError::Decode(e.to_string()))
}

#[axum::async_trait]
impl YieldApi for YieldApiClient {
    async fn predict(
        &self,
        payload: &FarmerPayload,
        authorization: Option<&str>,
    ) -> Result<YieldPrediction, UpstreamError> {
        let response: PredictionApiResponse = self
            .send_json(Method::POST, "yield/predict", authorization, Some(to_value(payload)?))
            .await?;
        Ok(response.into())
    }

    async fn advice(
        &self,
        request: &AdviceRequest,
        authorization: Option<&str>,
    ) -> Result<AdviceResponse, UpstreamError> {
        let response: AdviceApiResponse = self
            .send_json(Method::POST, "advice", authorization, Some(to_value(request)?))
            .await?;
        Ok(response.into())
    }

    async fn reference_options(&self) -> Result<ReferenceOptions, UpstreamError> {
        self.send_json(Method::GET, "reference/options", None, None)
            .await
    }

    async fn crop_lifecycle(
        &self,
        request: &LifecycleRequest,
        authorization: Option<&str>,
    ) -> Result<CropLifecycle, UpstreamError> {
        self.send_json(
            Method::POST,
            "crop-lifecycle/generate",
            authorization,
            Some(to_value(request)?),
        )
        .await
    }

    async fn current_user(&self, authorization: &str) -> Result<Value, UpstreamError> {
        self.send_json(Method::GET, "auth/me", Some(authorization), None)
            .await
    }
}
