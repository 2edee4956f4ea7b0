//! Stock ledger read service
//!
//! Read-only consumers of the `stock_levels` aggregate: filtered listings,
//! per-location summaries, CSV export, and the key lookup used by the
//! document services' sufficiency checks. All writes go through the ledger
//! update core.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::StockKey;

/// Stock query service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Filter parameters for stock listings
#[derive(Debug, Default, Deserialize)]
pub struct StockFilter {
    pub material_id: Option<Uuid>,
    pub direction_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    /// Include rows whose quantity is exactly zero (default: hidden)
    pub include_zero: Option<bool>,
}

/// One stock listing entry with resolved names
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StockEntry {
    pub material_id: Uuid,
    pub material_name: String,
    pub material_article: String,
    pub unit_name: String,
    pub direction_id: Uuid,
    pub direction_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub quantity: Decimal,
}

/// Per-location stock summary
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LocationStockSummary {
    pub location_id: Uuid,
    pub location_name: String,
    /// Number of non-zero ledger rows at this location
    pub position_count: i64,
    /// Number of distinct materials present
    pub material_count: i64,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List stock levels with names resolved, applying the given filter
    pub async fn list_stock(&self, filter: &StockFilter) -> AppResult<Vec<StockEntry>> {
        let include_zero = filter.include_zero.unwrap_or(false);

        let entries = sqlx::query_as::<_, StockEntry>(
            r#"
            SELECT s.material_id, m.name AS material_name, m.article AS material_article,
                   u.name AS unit_name,
                   s.direction_id, d.name AS direction_name,
                   s.location_id, l.name AS location_name,
                   s.quantity
            FROM stock_levels s
            JOIN materials m ON m.id = s.material_id
            JOIN units u ON u.id = m.unit_id
            JOIN directions d ON d.id = s.direction_id
            JOIN locations l ON l.id = s.location_id
            WHERE ($1::uuid IS NULL OR s.material_id = $1)
              AND ($2::uuid IS NULL OR s.direction_id = $2)
              AND ($3::uuid IS NULL OR s.location_id = $3)
              AND ($4 OR s.quantity <> 0)
            ORDER BY m.name, d.name, l.name
            "#,
        )
        .bind(filter.material_id)
        .bind(filter.direction_id)
        .bind(filter.location_id)
        .bind(include_zero)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Summarize stock per location
    pub async fn summary_by_location(&self) -> AppResult<Vec<LocationStockSummary>> {
        let rows = sqlx::query_as::<_, LocationStockSummary>(
            r#"
            SELECT l.id AS location_id, l.name AS location_name,
                   COUNT(s.id) FILTER (WHERE s.quantity <> 0) AS position_count,
                   COUNT(DISTINCT s.material_id) FILTER (WHERE s.quantity <> 0) AS material_count
            FROM locations l
            LEFT JOIN stock_levels s ON s.location_id = l.id
            GROUP BY l.id, l.name
            ORDER BY l.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Export the current stock listing as CSV
    pub async fn export_csv(&self, filter: &StockFilter) -> AppResult<String> {
        let entries = self.list_stock(filter).await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record([
            "material",
            "article",
            "unit",
            "direction",
            "location",
            "quantity",
        ])
        .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;

        for entry in &entries {
            wtr.write_record([
                entry.material_name.as_str(),
                entry.material_article.as_str(),
                entry.unit_name.as_str(),
                entry.direction_name.as_str(),
                entry.location_name.as_str(),
                &entry.quantity.to_string(),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding error: {}", e)))
    }

    /// Current quantity at a key, read inside the caller's transaction
    ///
    /// Missing rows count as zero; a ledger row is only created once the
    /// first delta touches it.
    pub async fn quantity_at(
        tx: &mut Transaction<'_, Postgres>,
        key: &StockKey,
    ) -> AppResult<Decimal> {
        let quantity = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(
                (SELECT quantity FROM stock_levels
                 WHERE material_id = $1 AND direction_id = $2 AND location_id = $3),
                0)
            "#,
        )
        .bind(key.material_id)
        .bind(key.direction_id)
        .bind(key.location_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(quantity)
    }
}
