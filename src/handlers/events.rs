//! Event investigation log handlers

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{AppError, AppResult};
use crate::middleware::dataset::LoadedDataset;
use crate::models::{SearchParams, SelectionParams, TableParams};
use crate::pipeline::{self, TablePage};

/// Filtered, searched and paged alert table
pub async fn list(
    LoadedDataset(dataset): LoadedDataset,
    params: SelectionParams,
    Query(table): Query<TableParams>,
) -> AppResult<Json<TablePage>> {
    table.validate()?;

    let (_, view) = super::filtered(&dataset, &params);
    let searched = pipeline::search(&view, &table.q);

    Ok(Json(TablePage::from_view(&searched, table.offset, table.limit)))
}

/// Download the filtered and searched table as CSV
pub async fn export(
    LoadedDataset(dataset): LoadedDataset,
    params: SelectionParams,
    Query(search): Query<SearchParams>,
) -> AppResult<Response> {
    let (_, view) = super::filtered(&dataset, &params);
    let searched = pipeline::search(&view, &search.q);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(searched.columns())?;
    for record in searched.iter() {
        wtr.write_record(&record.values)?;
    }
    let body = wtr
        .into_inner()
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!("Exported {} alert rows", searched.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"alerts_export.csv\""),
        ],
        body,
    )
        .into_response())
}
