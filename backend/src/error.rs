//! Error handling for the SmartYield server
//!
//! Only errors a client can act on reach a response; upstream failures in
//! the prediction flow are absorbed by the orchestrator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use shared::ValidationError;

use crate::external::UpstreamError;

/// Body returned by the `/api` proxy when the backend cannot be used
pub const PROXY_FAILURE_MESSAGE: &str = "Failed to fetch from backend";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error("Proxy failure: {0}")]
    ProxyFailure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Backend error ({status}): {message}")]
    Upstream { status: u16, message: String },
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

/// Client errors from the backend keep their status; everything else is a 502
impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, message } if (400..500).contains(&status) => {
                AppError::Upstream { status, message }
            }
            other => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            // The proxy keeps the flat body its callers already parse
            AppError::ProxyFailure(reason) => {
                tracing::error!("Proxy error: {}", reason);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": PROXY_FAILURE_MESSAGE })),
                )
                    .into_response();
            }
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Sign in to use this feature".to_string(),
                    field: None,
                },
            ),
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorDetail {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: message.clone(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
