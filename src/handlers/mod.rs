//! HTTP handlers

pub mod health;
pub mod filters;
pub mod dashboard;
pub mod events;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::AppError;
use crate::models::{Dataset, FilterSelection, SelectionParams, View};
use crate::pipeline;

/// Decoded from the raw query pairs so `severity` may repeat
#[axum::async_trait]
impl<S> FromRequestParts<S> for SelectionParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        Ok(SelectionParams::from_pairs(pairs))
    }
}

/// Apply the sidebar selection carried by the query string
pub(crate) fn filtered<'a>(
    dataset: &'a Dataset,
    params: &SelectionParams,
) -> (FilterSelection, View<'a>) {
    let selection = FilterSelection::from_params(params, dataset);
    let view = pipeline::filter(&dataset.view(), &selection);

    tracing::debug!(
        "Filter {:?} / {} kept {} of {} alerts",
        params.severity,
        selection.segment.label(),
        view.len(),
        dataset.len()
    );

    (selection, view)
}
