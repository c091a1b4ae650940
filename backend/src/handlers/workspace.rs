//! HTTP handlers for the prediction workspace

use axum::{extract::State, Json};
use serde::Serialize;

use shared::models::{CropLifecycle, FarmerForm, FarmerInput, LifecycleRequest, ReferenceOptions};
use shared::validate_lifecycle_request;
use shared::presentation::{build_view, WorkspaceView};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::services::{SessionService, SessionStatus, WorkspaceOutcome, WorkspaceService};
use crate::AppState;

/// Outcome of a submission together with its display model
#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    #[serde(flatten)]
    pub outcome: WorkspaceOutcome,
    pub view: WorkspaceView,
}

/// Validate the form, predict, advise
pub async fn predict(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<FarmerForm>,
) -> AppResult<Json<WorkspaceResponse>> {
    let input = FarmerInput::try_from(form)?;

    let outcome = WorkspaceService::new(state.api.clone())
        .run(&input, &session)
        .await;
    let view = build_view(
        Some(&outcome.prediction),
        Some(&outcome.advice),
        outcome.advisory.as_deref(),
    );

    Ok(Json(WorkspaceResponse { outcome, view }))
}

/// Crop, soil and irrigation options for the form
pub async fn options(State(state): State<AppState>) -> Json<ReferenceOptions> {
    Json(state.reference.options().await)
}

/// Validate the caller's bearer token
pub async fn session(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
) -> Json<SessionStatus> {
    let status = SessionService::new(state.api.clone())
        .check(&mut session)
        .await;
    Json(status)
}

/// Generated calendar plus the elapsed share of the season
#[derive(Debug, Serialize)]
pub struct LifecycleResponse {
    #[serde(flatten)]
    pub lifecycle: CropLifecycle,
    pub progress_percent: u32,
}

/// Build the crop lifecycle calendar for a signed-in farmer
pub async fn lifecycle(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<LifecycleRequest>,
) -> AppResult<Json<LifecycleResponse>> {
    let authorization = session.authorization_header().ok_or(AppError::Unauthorized)?;
    validate_lifecycle_request(&request)?;

    let lifecycle = state
        .api
        .crop_lifecycle(&request, Some(&authorization))
        .await
        .map_err(|e| {
            tracing::warn!("Crop calendar failed: {}", e);
            AppError::from(e)
        })?;

    tracing::debug!(
        crop = %lifecycle.crop_type,
        stages = lifecycle.stages.len(),
        "Crop calendar generated"
    );
    let progress_percent = lifecycle.progress_percent();
    Ok(Json(LifecycleResponse {
        lifecycle,
        progress_percent,
    }))
}
