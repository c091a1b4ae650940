//! Route definitions for the SmartYield server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Same-origin proxy to the prediction backend
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/*path",
        get(handlers::proxy)
            .post(handlers::proxy)
            .put(handlers::proxy)
            .delete(handlers::proxy),
    )
}

/// Prediction workspace routes
pub fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::workspace::predict))
        .route("/options", get(handlers::workspace::options))
        .route("/session", get(handlers::workspace::session))
        .route("/lifecycle", post(handlers::workspace::lifecycle))
}
