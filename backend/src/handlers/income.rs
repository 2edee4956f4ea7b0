//! HTTP handlers for incoming stock documents

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::income::{
    CreateIncomeInput, IncomeDetails, IncomeHeader, IncomeItemDetails, IncomeItemInput,
    IncomeService,
};
use crate::AppState;

/// List income document headers
pub async fn list_incomes(State(state): State<AppState>) -> AppResult<Json<Vec<IncomeHeader>>> {
    let service = IncomeService::new(state.db);
    Ok(Json(service.list_incomes().await?))
}

/// Create an income document with items
pub async fn create_income(
    State(state): State<AppState>,
    Json(input): Json<CreateIncomeInput>,
) -> AppResult<Json<IncomeDetails>> {
    let service = IncomeService::new(state.db);
    Ok(Json(service.create_income(input).await?))
}

/// Get an income document with item details
pub async fn get_income(
    State(state): State<AppState>,
    Path(income_id): Path<Uuid>,
) -> AppResult<Json<IncomeDetails>> {
    let service = IncomeService::new(state.db);
    Ok(Json(service.get_income(income_id).await?))
}

/// Delete an income document (reverses its ledger effects)
pub async fn delete_income(
    State(state): State<AppState>,
    Path(income_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = IncomeService::new(state.db);
    service.delete_income(income_id).await?;
    Ok(Json(()))
}

/// Add an item to an income document
pub async fn add_income_item(
    State(state): State<AppState>,
    Path(income_id): Path<Uuid>,
    Json(input): Json<IncomeItemInput>,
) -> AppResult<Json<IncomeItemDetails>> {
    let service = IncomeService::new(state.db);
    Ok(Json(service.add_item(income_id, input).await?))
}

/// In-place item editing is not reconciled by the stock ledger
pub async fn update_income_item() -> AppResult<Json<()>> {
    Err(AppError::UnsupportedOperation(
        "Line items cannot be edited in place; delete the item and recreate it".to_string(),
    ))
}

/// Delete an item from an income document (reverses its ledger effect)
pub async fn delete_income_item(
    State(state): State<AppState>,
    Path((income_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = IncomeService::new(state.db);
    service.delete_item(income_id, item_id).await?;
    Ok(Json(()))
}
