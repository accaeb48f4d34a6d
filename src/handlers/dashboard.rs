//! Dashboard handlers

use axum::{extract::{State, Query}, Json};
use serde::Serialize;
use validator::Validate;

use crate::{AppState, AppResult};
use crate::middleware::dataset::LoadedDataset;
use crate::models::{HourlyPoint, SelectionParams, Summary, TableParams, VectorShare};
use crate::pipeline::{self, KpiTile, Narrative, TablePage};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub selection: SelectionEcho,
    pub kpis: Vec<KpiTile>,
    pub hourly_series: Vec<HourlyPoint>,
    pub vector_breakdown: Vec<VectorShare>,
    pub narrative: Narrative,
    pub table: TablePage,
}

/// Selection as understood by the server
#[derive(Debug, Serialize)]
pub struct SelectionEcho {
    pub severities: Vec<String>,
    pub segment: String,
    pub query: String,
}

/// Raw aggregates for the current selection
pub async fn summary(
    LoadedDataset(dataset): LoadedDataset,
    params: SelectionParams,
) -> Json<Summary> {
    let (_, view) = super::filtered(&dataset, &params);
    Json(pipeline::summarize(&view))
}

/// Everything the single-page dashboard renders in one response
pub async fn dashboard(
    State(state): State<AppState>,
    LoadedDataset(dataset): LoadedDataset,
    params: SelectionParams,
    Query(table): Query<TableParams>,
) -> AppResult<Json<DashboardResponse>> {
    table.validate()?;

    let (selection, view) = super::filtered(&dataset, &params);
    let summary = pipeline::summarize(&view);
    let searched = pipeline::search(&view, &table.q);

    Ok(Json(DashboardResponse {
        selection: SelectionEcho {
            severities: selection.ordered_severities(&dataset),
            segment: selection.segment.label().to_string(),
            query: table.q.clone(),
        },
        kpis: pipeline::kpi_tiles(&summary, &state.config.system_health),
        narrative: pipeline::narrative(&summary),
        table: TablePage::from_view(&searched, table.offset, table.limit),
        hourly_series: summary.hourly_series,
        vector_breakdown: summary.vector_breakdown,
    }))
}
