//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    dataset: DatasetHealth,
}

#[derive(Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DatasetHealth {
    Loaded { records: usize },
    Unavailable { error: String },
    Pending,
}

/// Does not trigger a load; a lazily loaded dataset reports `pending`
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset = match state.store.cached() {
        Some(Ok(dataset)) => DatasetHealth::Loaded { records: dataset.len() },
        Some(Err(e)) => DatasetHealth::Unavailable { error: e.to_string() },
        None => DatasetHealth::Pending,
    };

    let status = match dataset {
        DatasetHealth::Unavailable { .. } => "degraded",
        _ => "healthy",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        dataset,
    })
}
