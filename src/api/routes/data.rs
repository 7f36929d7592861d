//! Filtered submission data and CSV download.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::{parse_session_id, run_blocking, ApiError};
use crate::calculate::{filter_options, FilterSelection};
use crate::models::{FilterOptions, SubmissionsView};
use crate::storage::{to_csv_bytes, EXPORT_FILENAME};

pub async fn filters(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FilterOptions>, ApiError> {
    let id = parse_session_id(&id)?;
    let table = state.table(&id).await?;
    let options = run_blocking(move || filter_options(&table)).await?;
    Ok(Json(options))
}

#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub total_rows: usize,
    pub matched_rows: usize,
    #[serde(flatten)]
    pub data: SubmissionsView,
}

pub async fn submissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<SubmissionsResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let table = state.table(&id).await?;

    let response = run_blocking(move || {
        let filtered = selection.apply(&table);
        SubmissionsResponse {
            total_rows: table.len(),
            matched_rows: filtered.len(),
            data: SubmissionsView::from_table(&filtered),
        }
    })
    .await?;
    Ok(Json(response))
}

pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(selection): Json<FilterSelection>,
) -> Result<Response, ApiError> {
    let id = parse_session_id(&id)?;
    let table = state.table(&id).await?;
    let total = table.len();

    let (matched, body) = run_blocking(move || {
        let filtered = selection.apply(&table);
        to_csv_bytes(&filtered).map(|bytes| (filtered.len(), bytes))
    })
    .await?
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Exported {} of {} rows from session {}", matched, total, id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
