//! Dataset middleware
//!
//! Resolves the cached dataset once per request and hands it to handlers,
//! answering 503 for the whole API while the file cannot be loaded.

use std::sync::Arc;

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::Response,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::{AppState, AppError};
use crate::models::Dataset;

/// Dataset resolved by [`require_dataset`]
#[derive(Debug, Clone)]
pub struct LoadedDataset(pub Arc<Dataset>);

/// Middleware: Require a loaded dataset
pub async fn require_dataset(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;

    req.extensions_mut().insert(LoadedDataset(dataset));

    Ok(next.run(req).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for LoadedDataset
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<LoadedDataset>()
            .cloned()
            .ok_or_else(|| AppError::InternalError("dataset middleware not installed".to_string()))
    }
}
