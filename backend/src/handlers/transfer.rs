//! HTTP handlers for transfer documents

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::transfer::{
    CreateTransferInput, TransferDetails, TransferHeader, TransferItemDetails, TransferItemInput,
    TransferService,
};
use crate::AppState;

/// List transfer document headers
pub async fn list_transfers(State(state): State<AppState>) -> AppResult<Json<Vec<TransferHeader>>> {
    let service = TransferService::new(state.db);
    Ok(Json(service.list_transfers().await?))
}

/// Create a transfer document with items
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(input): Json<CreateTransferInput>,
) -> AppResult<Json<TransferDetails>> {
    let service = TransferService::new(state.db);
    Ok(Json(service.create_transfer(input).await?))
}

/// Get a transfer document with item details
pub async fn get_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
) -> AppResult<Json<TransferDetails>> {
    let service = TransferService::new(state.db);
    Ok(Json(service.get_transfer(transfer_id).await?))
}

/// Delete a transfer document (reverses both deltas of every item)
pub async fn delete_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = TransferService::new(state.db);
    service.delete_transfer(transfer_id).await?;
    Ok(Json(()))
}

/// Add an item to a transfer document
pub async fn add_transfer_item(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
    Json(input): Json<TransferItemInput>,
) -> AppResult<Json<TransferItemDetails>> {
    let service = TransferService::new(state.db);
    Ok(Json(service.add_item(transfer_id, input).await?))
}

/// In-place item editing is not reconciled by the stock ledger
pub async fn update_transfer_item() -> AppResult<Json<()>> {
    Err(AppError::UnsupportedOperation(
        "Line items cannot be edited in place; delete the item and recreate it".to_string(),
    ))
}

/// Delete an item from a transfer document (reverses both of its deltas)
pub async fn delete_transfer_item(
    State(state): State<AppState>,
    Path((transfer_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = TransferService::new(state.db);
    service.delete_item(transfer_id, item_id).await?;
    Ok(Json(()))
}
