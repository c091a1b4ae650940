//! Same-origin `/api` proxy
//!
//! Forwards to `{upstream}/api/{path}` and relays status and JSON body.
//! The Authorization header goes through verbatim.

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Proxy any GET/POST/PUT/DELETE under `/api`
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| AppError::BadRequest(format!("Unsupported method: {}", e)))?;

    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    // GET carries no body; others must carry JSON when they carry anything
    let payload = if method == Method::GET || body.is_empty() {
        None
    } else {
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::ProxyFailure(format!("request body is not JSON: {}", e)))?;
        Some(value)
    };

    tracing::debug!(%method, path = %path, "Proxying request");

    let forwarded = state
        .client
        .forward(
            upstream_method,
            &path,
            query.as_deref(),
            authorization,
            payload,
        )
        .await
        .map_err(|e| AppError::ProxyFailure(e.to_string()))?;

    let status = StatusCode::from_u16(forwarded.status)
        .map_err(|e| AppError::ProxyFailure(format!("invalid upstream status: {}", e)))?;

    Ok((status, Json(forwarded.body)).into_response())
}
