//! HTTP handlers for stock ledger queries

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::AppResult;
use crate::services::stock::{LocationStockSummary, StockEntry, StockFilter, StockService};
use crate::AppState;

/// List stock levels with resolved names
pub async fn list_stock(
    State(state): State<AppState>,
    Query(filter): Query<StockFilter>,
) -> AppResult<Json<Vec<StockEntry>>> {
    let service = StockService::new(state.db);
    Ok(Json(service.list_stock(&filter).await?))
}

/// Per-location stock summary
pub async fn get_stock_summary(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationStockSummary>>> {
    let service = StockService::new(state.db);
    Ok(Json(service.summary_by_location().await?))
}

/// Export the stock listing as CSV
pub async fn export_stock(
    State(state): State<AppState>,
    Query(filter): Query<StockFilter>,
) -> AppResult<impl IntoResponse> {
    let service = StockService::new(state.db);
    let csv = service.export_csv(&filter).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"stock.csv\"",
            ),
        ],
        csv,
    ))
}
