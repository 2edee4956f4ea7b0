//! HTTP handler for bulk CSV income import

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::ImportReport;
use crate::services::ImportService;
use crate::AppState;

/// Query parameters for the import endpoint
#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    /// User recorded as responsible on every created document
    pub responsible_id: Uuid,
}

/// Import income documents from a CSV request body
///
/// Returns a per-row report; malformed rows are skipped, never partially
/// persisted.
pub async fn import_incomes(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let service = ImportService::new(state.db);
    let report = service
        .import_incomes(&body, query.responsible_id)
        .await?;
    Ok(Json(report))
}
