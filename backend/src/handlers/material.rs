//! HTTP handlers for material endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::MaterialWithUnit;
use crate::services::material::{MaterialInput, MaterialService};
use crate::AppState;

/// Search parameters for material listings
#[derive(Debug, Deserialize)]
pub struct MaterialQuery {
    /// Name substring filter
    pub q: Option<String>,
}

/// List materials, optionally filtered by name substring
pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialQuery>,
) -> AppResult<Json<Vec<MaterialWithUnit>>> {
    let service = MaterialService::new(state.db);
    Ok(Json(service.list_materials(query.q.as_deref()).await?))
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<MaterialInput>,
) -> AppResult<Json<MaterialWithUnit>> {
    let service = MaterialService::new(state.db);
    Ok(Json(service.create_material(input).await?))
}

/// Get a material
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<MaterialWithUnit>> {
    let service = MaterialService::new(state.db);
    Ok(Json(service.get_material(material_id).await?))
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<MaterialInput>,
) -> AppResult<Json<MaterialWithUnit>> {
    let service = MaterialService::new(state.db);
    Ok(Json(service.update_material(material_id, input).await?))
}

/// Delete a material (restricted while referenced)
pub async fn delete_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MaterialService::new(state.db);
    service.delete_material(material_id).await?;
    Ok(Json(()))
}
