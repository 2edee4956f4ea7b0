//! Route definitions for the Warehouse Stock Management API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Reference catalogs
        .nest("/units", unit_routes())
        .nest("/directions", direction_routes())
        .nest("/locations", location_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/materials", material_routes())
        // Users (responsible actors on documents)
        .nest("/users", user_routes())
        // Documents
        .nest("/incomes", income_routes())
        .nest("/transfers", transfer_routes())
        .nest("/write-offs", writeoff_routes())
        // Stock ledger (read-only)
        .nest("/stock", stock_routes())
        // Bulk import
        .route("/import/incomes", post(handlers::import_incomes))
}

/// Unit catalog routes
fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_units).post(handlers::create_unit))
        .route(
            "/:unit_id",
            get(handlers::get_unit)
                .put(handlers::update_unit)
                .delete(handlers::delete_unit),
        )
}

/// Direction catalog routes
fn direction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_directions).post(handlers::create_direction),
        )
        .route(
            "/:direction_id",
            get(handlers::get_direction)
                .put(handlers::update_direction)
                .delete(handlers::delete_direction),
        )
}

/// Location catalog routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/:location_id",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
}

/// Supplier catalog routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
}

/// Material catalog routes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_users).post(handlers::create_user))
}

/// Income document routes
fn income_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_incomes).post(handlers::create_income))
        .route(
            "/:income_id",
            get(handlers::get_income).delete(handlers::delete_income),
        )
        .route("/:income_id/items", post(handlers::add_income_item))
        .route(
            "/:income_id/items/:item_id",
            // PUT is an explicit unsupported operation: item edits are not
            // reconciled by the ledger
            axum::routing::put(handlers::update_income_item).delete(handlers::delete_income_item),
        )
}

/// Transfer document routes
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transfers).post(handlers::create_transfer),
        )
        .route(
            "/:transfer_id",
            get(handlers::get_transfer).delete(handlers::delete_transfer),
        )
        .route("/:transfer_id/items", post(handlers::add_transfer_item))
        .route(
            "/:transfer_id/items/:item_id",
            axum::routing::put(handlers::update_transfer_item)
                .delete(handlers::delete_transfer_item),
        )
}

/// Write-off document routes
fn writeoff_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_writeoffs).post(handlers::create_writeoff),
        )
        .route(
            "/:writeoff_id",
            get(handlers::get_writeoff).delete(handlers::delete_writeoff),
        )
        .route("/:writeoff_id/items", post(handlers::add_writeoff_item))
        .route(
            "/:writeoff_id/items/:item_id",
            axum::routing::put(handlers::update_writeoff_item)
                .delete(handlers::delete_writeoff_item),
        )
}

/// Stock ledger routes (read-only)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock))
        .route("/summary", get(handlers::get_stock_summary))
        .route("/export", get(handlers::export_stock))
}
