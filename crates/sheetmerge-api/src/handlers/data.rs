//! Merged dataset handler

use axum::extract::State;
use axum::Json;
use sheetmerge_core::{aggregate, Table};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /all-data
/// Parse every stored CSV/XLSX file and return the merged rows
pub async fn all_data(State(state): State<AppState>) -> Result<Json<Table>, ApiError> {
    let store = state.store_arc();

    // Parsing is synchronous file I/O
    let merged = tokio::task::spawn_blocking(move || aggregate(&store))
        .await
        .map_err(|e| ApiError::Internal(format!("Aggregation task failed: {}", e)))??;

    Ok(Json(merged))
}
