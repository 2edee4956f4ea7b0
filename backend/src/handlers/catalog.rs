//! HTTP handlers for reference catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Direction, Location, Supplier, Unit};
use crate::services::catalog::{CatalogService, LocationInput, NamedInput, SupplierInput};
use crate::AppState;

// ============================================================================
// Units
// ============================================================================

/// List units of measure
pub async fn list_units(State(state): State<AppState>) -> AppResult<Json<Vec<Unit>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_units().await?))
}

/// Create a unit of measure
pub async fn create_unit(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> AppResult<Json<Unit>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.create_unit(input).await?))
}

/// Get a unit
pub async fn get_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> AppResult<Json<Unit>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.get_unit(unit_id).await?))
}

/// Rename a unit
pub async fn update_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Json(input): Json<NamedInput>,
) -> AppResult<Json<Unit>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.update_unit(unit_id, input).await?))
}

/// Delete a unit (restricted while referenced)
pub async fn delete_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_unit(unit_id).await?;
    Ok(Json(()))
}

// ============================================================================
// Directions
// ============================================================================

/// List directions
pub async fn list_directions(State(state): State<AppState>) -> AppResult<Json<Vec<Direction>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_directions().await?))
}

/// Create a direction
pub async fn create_direction(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> AppResult<Json<Direction>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.create_direction(input).await?))
}

/// Get a direction
pub async fn get_direction(
    State(state): State<AppState>,
    Path(direction_id): Path<Uuid>,
) -> AppResult<Json<Direction>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.get_direction(direction_id).await?))
}

/// Rename a direction
pub async fn update_direction(
    State(state): State<AppState>,
    Path(direction_id): Path<Uuid>,
    Json(input): Json<NamedInput>,
) -> AppResult<Json<Direction>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.update_direction(direction_id, input).await?))
}

/// Delete a direction (restricted while referenced)
pub async fn delete_direction(
    State(state): State<AppState>,
    Path(direction_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_direction(direction_id).await?;
    Ok(Json(()))
}

// ============================================================================
// Locations
// ============================================================================

/// List storage locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_locations().await?))
}

/// Create a storage location
pub async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<LocationInput>,
) -> AppResult<Json<Location>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.create_location(input).await?))
}

/// Get a location
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<Location>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.get_location(location_id).await?))
}

/// Update a location
pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(input): Json<LocationInput>,
) -> AppResult<Json<Location>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.update_location(location_id, input).await?))
}

/// Delete a location (restricted while referenced)
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_location(location_id).await?;
    Ok(Json(()))
}

// ============================================================================
// Suppliers
// ============================================================================

/// List suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_suppliers().await?))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<SupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.create_supplier(input).await?))
}

/// Get a supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.get_supplier(supplier_id).await?))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<SupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.update_supplier(supplier_id, input).await?))
}

/// Delete a supplier (restricted while referenced)
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_supplier(supplier_id).await?;
    Ok(Json(()))
}
