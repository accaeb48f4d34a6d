//! Control center handlers

use axum::Json;
use serde::Serialize;

use crate::middleware::dataset::LoadedDataset;
use crate::models::{FilterSelection, ALL_SEGMENTS};

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub severities: Vec<String>,
    /// "All Segments" first, then each segment in file order
    pub segments: Vec<String>,
    pub default_severities: Vec<String>,
    pub default_segment: &'static str,
}

/// Options for the severity multi-select and the segment select box
pub async fn options(LoadedDataset(dataset): LoadedDataset) -> Json<FilterOptions> {
    let severities = dataset.distinct_severities();
    let segments = std::iter::once(ALL_SEGMENTS.to_string())
        .chain(dataset.distinct_systems())
        .collect();

    let defaults = FilterSelection::all(&dataset);

    Json(FilterOptions {
        default_severities: defaults.ordered_severities(&dataset),
        severities,
        segments,
        default_segment: ALL_SEGMENTS,
    })
}
