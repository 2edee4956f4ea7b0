//! Write-off document service
//!
//! Mirrors the income service with the opposite ledger sign. Sufficiency of
//! stock is checked here, at item creation, because the ledger core itself
//! never refuses a delta; deleting documents elsewhere can still legitimately
//! drive a balance negative.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ItemEffect, StockKey, WriteOff, WriteOffItem};
use crate::services::income::{validate_item_refs, validate_responsible};
use crate::services::ledger::LedgerService;
use crate::services::stock::StockService;
use shared::validation::validate_quantity;

/// Write-off document service
#[derive(Clone)]
pub struct WriteOffService {
    db: PgPool,
}

/// Input for one write-off line item
#[derive(Debug, Clone, Deserialize)]
pub struct WriteOffItemInput {
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub direction_id: Uuid,
    pub location_id: Uuid,
}

/// Input for creating a write-off document
#[derive(Debug, Deserialize)]
pub struct CreateWriteOffInput {
    pub date: NaiveDate,
    pub reason: String,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    #[serde(default)]
    pub items: Vec<WriteOffItemInput>,
}

/// Write-off header as listed
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WriteOffHeader {
    pub id: Uuid,
    pub date: NaiveDate,
    pub reason: String,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    pub responsible_name: String,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Full write-off document with item details
#[derive(Debug, Serialize)]
pub struct WriteOffDetails {
    #[serde(flatten)]
    pub writeoff: WriteOff,
    pub responsible_name: String,
    pub items: Vec<WriteOffItemDetails>,
}

/// Write-off line item with names resolved
#[derive(Debug, Serialize)]
pub struct WriteOffItemDetails {
    #[serde(flatten)]
    pub item: WriteOffItem,
    pub material_name: String,
    pub material_article: String,
    pub unit_name: String,
    pub direction_name: String,
    pub location_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct WriteOffItemRow {
    id: Uuid,
    writeoff_id: Uuid,
    material_id: Uuid,
    quantity: Decimal,
    direction_id: Uuid,
    location_id: Uuid,
    material_name: String,
    material_article: String,
    unit_name: String,
    direction_name: String,
    location_name: String,
}

impl From<WriteOffItemRow> for WriteOffItemDetails {
    fn from(row: WriteOffItemRow) -> Self {
        WriteOffItemDetails {
            item: WriteOffItem {
                id: row.id,
                writeoff_id: row.writeoff_id,
                material_id: row.material_id,
                quantity: row.quantity,
                direction_id: row.direction_id,
                location_id: row.location_id,
            },
            material_name: row.material_name,
            material_article: row.material_article,
            unit_name: row.unit_name,
            direction_name: row.direction_name,
            location_name: row.location_name,
        }
    }
}

impl WriteOffItemInput {
    fn effect(&self) -> ItemEffect {
        ItemEffect::WriteOff {
            material_id: self.material_id,
            direction_id: self.direction_id,
            location_id: self.location_id,
            quantity: self.quantity,
        }
    }

    fn key(&self) -> StockKey {
        StockKey::new(self.material_id, self.direction_id, self.location_id)
    }
}

impl WriteOffService {
    /// Create a new WriteOffService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List write-off document headers, newest first
    pub async fn list_writeoffs(&self) -> AppResult<Vec<WriteOffHeader>> {
        let headers = sqlx::query_as::<_, WriteOffHeader>(
            r#"
            SELECT w.id, w.date, w.reason, w.document_number,
                   w.responsible_id, u.full_name AS responsible_name,
                   (SELECT COUNT(*) FROM write_off_items it WHERE it.writeoff_id = w.id) AS item_count,
                   w.created_at
            FROM write_offs w
            JOIN users u ON u.id = w.responsible_id
            ORDER BY w.date DESC, w.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(headers)
    }

    /// Create a write-off document with its items
    pub async fn create_writeoff(&self, input: CreateWriteOffInput) -> AppResult<WriteOffDetails> {
        if input.reason.trim().is_empty() {
            return Err(AppError::Validation {
                field: "reason".to_string(),
                message: "Reason must not be empty".to_string(),
            });
        }

        validate_responsible(&self.db, input.responsible_id).await?;

        let mut tx = self.db.begin().await?;

        let writeoff_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO write_offs (date, reason, document_number, responsible_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.date)
        .bind(input.reason.trim())
        .bind(&input.document_number)
        .bind(input.responsible_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            Self::insert_item(&mut tx, writeoff_id, item).await?;
        }

        tx.commit().await?;

        self.get_writeoff(writeoff_id).await
    }

    /// Get a write-off document with item details
    pub async fn get_writeoff(&self, writeoff_id: Uuid) -> AppResult<WriteOffDetails> {
        let header = sqlx::query_as::<_, (Uuid, NaiveDate, String, Option<String>, Uuid, String, DateTime<Utc>)>(
            r#"
            SELECT w.id, w.date, w.reason, w.document_number, w.responsible_id,
                   u.full_name, w.created_at
            FROM write_offs w
            JOIN users u ON u.id = w.responsible_id
            WHERE w.id = $1
            "#,
        )
        .bind(writeoff_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Write-off".to_string()))?;

        let items = sqlx::query_as::<_, WriteOffItemRow>(
            r#"
            SELECT it.id, it.writeoff_id, it.material_id, it.quantity, it.direction_id,
                   it.location_id, m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name, d.name AS direction_name, l.name AS location_name
            FROM write_off_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions d ON d.id = it.direction_id
            JOIN locations l ON l.id = it.location_id
            WHERE it.writeoff_id = $1
            ORDER BY m.name
            "#,
        )
        .bind(writeoff_id)
        .fetch_all(&self.db)
        .await?;

        Ok(WriteOffDetails {
            writeoff: WriteOff {
                id: header.0,
                date: header.1,
                reason: header.2,
                document_number: header.3,
                responsible_id: header.4,
                created_at: header.6,
            },
            responsible_name: header.5,
            items: items.into_iter().map(WriteOffItemDetails::from).collect(),
        })
    }

    /// Delete a write-off document, reversing every item's ledger effect
    pub async fn delete_writeoff(&self, writeoff_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let items = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid)>(
            "SELECT material_id, quantity, direction_id, location_id
             FROM write_off_items WHERE writeoff_id = $1",
        )
        .bind(writeoff_id)
        .fetch_all(&mut *tx)
        .await?;

        for (material_id, quantity, direction_id, location_id) in items {
            let effect = ItemEffect::WriteOff {
                material_id,
                direction_id,
                location_id,
                quantity,
            };
            LedgerService::on_item_deleted(&mut tx, &effect).await?;
        }

        let result = sqlx::query("DELETE FROM write_offs WHERE id = $1")
            .bind(writeoff_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Write-off".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Add one item to an existing write-off document
    pub async fn add_item(
        &self,
        writeoff_id: Uuid,
        input: WriteOffItemInput,
    ) -> AppResult<WriteOffItemDetails> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM write_offs WHERE id = $1)")
                .bind(writeoff_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Write-off".to_string()));
        }

        let mut tx = self.db.begin().await?;
        let item_id = Self::insert_item(&mut tx, writeoff_id, &input).await?;
        tx.commit().await?;

        self.get_item(writeoff_id, item_id).await
    }

    /// Delete one item, reversing its ledger effect
    pub async fn delete_item(&self, writeoff_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid)>(
            "SELECT material_id, quantity, direction_id, location_id
             FROM write_off_items WHERE id = $1 AND writeoff_id = $2",
        )
        .bind(item_id)
        .bind(writeoff_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Write-off item".to_string()))?;

        let effect = ItemEffect::WriteOff {
            material_id: item.0,
            direction_id: item.2,
            location_id: item.3,
            quantity: item.1,
        };
        LedgerService::on_item_deleted(&mut tx, &effect).await?;

        sqlx::query("DELETE FROM write_off_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_item(&self, writeoff_id: Uuid, item_id: Uuid) -> AppResult<WriteOffItemDetails> {
        let row = sqlx::query_as::<_, WriteOffItemRow>(
            r#"
            SELECT it.id, it.writeoff_id, it.material_id, it.quantity, it.direction_id,
                   it.location_id, m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name, d.name AS direction_name, l.name AS location_name
            FROM write_off_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions d ON d.id = it.direction_id
            JOIN locations l ON l.id = it.location_id
            WHERE it.id = $1 AND it.writeoff_id = $2
            "#,
        )
        .bind(item_id)
        .bind(writeoff_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Write-off item".to_string()))?;

        Ok(row.into())
    }

    /// Validate, insert and ledger-debit one item inside the transaction
    async fn insert_item(
        tx: &mut Transaction<'_, Postgres>,
        writeoff_id: Uuid,
        input: &WriteOffItemInput,
    ) -> AppResult<Uuid> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        validate_item_refs(
            tx,
            input.material_id,
            input.direction_id,
            input.location_id,
        )
        .await?;

        // Caller-side sufficiency check; the ledger core never refuses a delta
        let available = StockService::quantity_at(tx, &input.key()).await?;
        if available < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "requested {} but only {} available at this key",
                input.quantity, available
            )));
        }

        let item_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO write_off_items (writeoff_id, material_id, quantity, direction_id, location_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(writeoff_id)
        .bind(input.material_id)
        .bind(input.quantity)
        .bind(input.direction_id)
        .bind(input.location_id)
        .fetch_one(&mut **tx)
        .await?;

        LedgerService::on_item_created(tx, &input.effect()).await?;

        Ok(item_id)
    }
}
