//! SmartYield server
//!
//! Backend-for-frontend for the agricultural advisory workspace: runs the
//! prediction and advice flow with offline fallback, serves reference
//! options and proxies `/api` to the prediction backend.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::{YieldApi, YieldApiClient};
use services::ReferenceService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Raw client used by the proxy
    pub client: YieldApiClient,
    /// Typed calls used by the orchestrators
    pub api: Arc<dyn YieldApi>,
    pub reference: ReferenceService,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = YieldApiClient::new(&config.upstream)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: YieldApiClient) -> Self {
        let api: Arc<dyn YieldApi> = Arc::new(client.clone());
        let reference = ReferenceService::new(api.clone(), config.reference.freshness());
        Self {
            config: Arc::new(config),
            client,
            api,
            reference,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .nest("/workspace", routes::workspace_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "SmartYield workspace API v0.1"
}
