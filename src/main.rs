//! CyberSphere Dashboard Server
//!
//! Security alert dashboard backend: loads the alert CSV once and serves
//! filtered KPIs, charts and the event investigation table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CYBERSPHERE MONITORING                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌────────────────────┐ │
//! │  │  API      │  │  Pipeline      │  │  Report            │ │
//! │  │  (Axum)   │─▶│  filter/search │─▶│  KPIs, narrative   │ │
//! │  └─────┬─────┘  │  summarize     │  │  table pages       │ │
//! │        │        └────────────────┘  └────────────────────┘ │
//! │        ▼                                                   │
//! │  ┌──────────────┐                                          │
//! │  │ DatasetStore │◀── dataset2_threat_detection.csv         │
//! │  └──────────────┘                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod loader;
mod models;
mod pipeline;
mod handlers;
mod middleware;
mod error;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loader::DatasetStore;
use models::Dataset;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cybersphere=debug,tower_http=debug".into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("CyberSphere dashboard starting...");
    let state = AppState {
        store: Arc::new(DatasetStore::new(&config.data_file)),
        config: config.clone(),
    };
    tracing::info!("Dataset: {}", state.store.path().display());

    // A failed load is reported, not fatal
    if config.eager_load {
        if let Err(e) = state.dataset().await {
            tracing::warn!("Serving without data: {:?}", e);
        }
    }

    let app = create_router(state);

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub config: config::Config,
}

impl AppState {
    /// Cached dataset, loading it on a blocking thread the first time
    pub async fn dataset(&self) -> AppResult<Arc<Dataset>> {
        let outcome = match self.store.cached() {
            Some(outcome) => outcome,
            None => {
                let store = self.store.clone();
                tokio::task::spawn_blocking(move || store.get())
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?
            }
        };

        outcome.map_err(|e| AppError::DatasetUnavailable {
            file: self.store.file_name(),
            details: e.to_string(),
        })
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check));

    // Dashboard routes (dataset required)
    let dashboard_routes = Router::new()
        .route("/api/v1/filters", get(handlers::filters::options))
        .route("/api/v1/summary", get(handlers::dashboard::summary))
        .route("/api/v1/dashboard", get(handlers::dashboard::dashboard))
        .route("/api/v1/events", get(handlers::events::list))
        .route("/api/v1/events/export", get(handlers::events::export))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::dataset::require_dataset
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(dashboard_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
