//! HTTP handlers for write-off documents

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::writeoff::{
    CreateWriteOffInput, WriteOffDetails, WriteOffHeader, WriteOffItemDetails, WriteOffItemInput,
    WriteOffService,
};
use crate::AppState;

/// List write-off document headers
pub async fn list_writeoffs(State(state): State<AppState>) -> AppResult<Json<Vec<WriteOffHeader>>> {
    let service = WriteOffService::new(state.db);
    Ok(Json(service.list_writeoffs().await?))
}

/// Create a write-off document with items
pub async fn create_writeoff(
    State(state): State<AppState>,
    Json(input): Json<CreateWriteOffInput>,
) -> AppResult<Json<WriteOffDetails>> {
    let service = WriteOffService::new(state.db);
    Ok(Json(service.create_writeoff(input).await?))
}

/// Get a write-off document with item details
pub async fn get_writeoff(
    State(state): State<AppState>,
    Path(writeoff_id): Path<Uuid>,
) -> AppResult<Json<WriteOffDetails>> {
    let service = WriteOffService::new(state.db);
    Ok(Json(service.get_writeoff(writeoff_id).await?))
}

/// Delete a write-off document (reverses its ledger effects)
pub async fn delete_writeoff(
    State(state): State<AppState>,
    Path(writeoff_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = WriteOffService::new(state.db);
    service.delete_writeoff(writeoff_id).await?;
    Ok(Json(()))
}

/// Add an item to a write-off document
pub async fn add_writeoff_item(
    State(state): State<AppState>,
    Path(writeoff_id): Path<Uuid>,
    Json(input): Json<WriteOffItemInput>,
) -> AppResult<Json<WriteOffItemDetails>> {
    let service = WriteOffService::new(state.db);
    Ok(Json(service.add_item(writeoff_id, input).await?))
}

/// In-place item editing is not reconciled by the stock ledger
pub async fn update_writeoff_item() -> AppResult<Json<()>> {
    Err(AppError::UnsupportedOperation(
        "Line items cannot be edited in place; delete the item and recreate it".to_string(),
    ))
}

/// Delete an item from a write-off document (reverses its ledger effect)
pub async fn delete_writeoff_item(
    State(state): State<AppState>,
    Path((writeoff_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = WriteOffService::new(state.db);
    service.delete_item(writeoff_id, item_id).await?;
    Ok(Json(()))
}
