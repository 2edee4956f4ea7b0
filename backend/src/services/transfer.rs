//! Inter-location transfer document service
//!
//! A transfer item is the one case where a single lifecycle event produces
//! two ledger deltas: a debit at the source key and a credit at the
//! destination. Both are issued from one event and applied inside one
//! transaction, so either both land or neither does.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ItemEffect, StockKey, Transfer, TransferItem};
use crate::services::income::{validate_item_refs, validate_responsible};
use crate::services::ledger::LedgerService;
use crate::services::stock::StockService;
use shared::validation::{validate_quantity, validate_transfer_endpoints};

/// Transfer document service
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
}

/// Input for one transfer line item
#[derive(Debug, Clone, Deserialize)]
pub struct TransferItemInput {
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub from_direction_id: Uuid,
    pub from_location_id: Uuid,
    pub to_direction_id: Uuid,
    pub to_location_id: Uuid,
}

/// Input for creating a transfer document
#[derive(Debug, Deserialize)]
pub struct CreateTransferInput {
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    #[serde(default)]
    pub items: Vec<TransferItemInput>,
}

/// Transfer header as listed
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TransferHeader {
    pub id: Uuid,
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    pub responsible_name: String,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Full transfer document with item details
#[derive(Debug, Serialize)]
pub struct TransferDetails {
    #[serde(flatten)]
    pub transfer: Transfer,
    pub responsible_name: String,
    pub items: Vec<TransferItemDetails>,
}

/// Transfer line item with names resolved
#[derive(Debug, Serialize)]
pub struct TransferItemDetails {
    #[serde(flatten)]
    pub item: TransferItem,
    pub material_name: String,
    pub material_article: String,
    pub unit_name: String,
    pub from_direction_name: String,
    pub from_location_name: String,
    pub to_direction_name: String,
    pub to_location_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct TransferItemRow {
    id: Uuid,
    transfer_id: Uuid,
    material_id: Uuid,
    quantity: Decimal,
    from_direction_id: Uuid,
    from_location_id: Uuid,
    to_direction_id: Uuid,
    to_location_id: Uuid,
    material_name: String,
    material_article: String,
    unit_name: String,
    from_direction_name: String,
    from_location_name: String,
    to_direction_name: String,
    to_location_name: String,
}

impl From<TransferItemRow> for TransferItemDetails {
    fn from(row: TransferItemRow) -> Self {
        TransferItemDetails {
            item: TransferItem {
                id: row.id,
                transfer_id: row.transfer_id,
                material_id: row.material_id,
                quantity: row.quantity,
                from_direction_id: row.from_direction_id,
                from_location_id: row.from_location_id,
                to_direction_id: row.to_direction_id,
                to_location_id: row.to_location_id,
            },
            material_name: row.material_name,
            material_article: row.material_article,
            unit_name: row.unit_name,
            from_direction_name: row.from_direction_name,
            from_location_name: row.from_location_name,
            to_direction_name: row.to_direction_name,
            to_location_name: row.to_location_name,
        }
    }
}

impl TransferItemInput {
    fn effect(&self) -> ItemEffect {
        ItemEffect::Transfer {
            material_id: self.material_id,
            quantity: self.quantity,
            from_direction_id: self.from_direction_id,
            from_location_id: self.from_location_id,
            to_direction_id: self.to_direction_id,
            to_location_id: self.to_location_id,
        }
    }

    fn source_key(&self) -> StockKey {
        StockKey::new(self.material_id, self.from_direction_id, self.from_location_id)
    }
}

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List transfer document headers, newest first
    pub async fn list_transfers(&self) -> AppResult<Vec<TransferHeader>> {
        let headers = sqlx::query_as::<_, TransferHeader>(
            r#"
            SELECT t.id, t.date, t.document_number,
                   t.responsible_id, u.full_name AS responsible_name,
                   (SELECT COUNT(*) FROM transfer_items it WHERE it.transfer_id = t.id) AS item_count,
                   t.created_at
            FROM transfers t
            JOIN users u ON u.id = t.responsible_id
            ORDER BY t.date DESC, t.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(headers)
    }

    /// Create a transfer document with its items
    pub async fn create_transfer(&self, input: CreateTransferInput) -> AppResult<TransferDetails> {
        validate_responsible(&self.db, input.responsible_id).await?;

        let mut tx = self.db.begin().await?;

        let transfer_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transfers (date, document_number, responsible_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.date)
        .bind(&input.document_number)
        .bind(input.responsible_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            Self::insert_item(&mut tx, transfer_id, item).await?;
        }

        tx.commit().await?;

        self.get_transfer(transfer_id).await
    }

    /// Get a transfer document with item details
    pub async fn get_transfer(&self, transfer_id: Uuid) -> AppResult<TransferDetails> {
        let header = sqlx::query_as::<_, (Uuid, NaiveDate, Option<String>, Uuid, String, DateTime<Utc>)>(
            r#"
            SELECT t.id, t.date, t.document_number, t.responsible_id, u.full_name, t.created_at
            FROM transfers t
            JOIN users u ON u.id = t.responsible_id
            WHERE t.id = $1
            "#,
        )
        .bind(transfer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        let items = sqlx::query_as::<_, TransferItemRow>(
            r#"
            SELECT it.id, it.transfer_id, it.material_id, it.quantity,
                   it.from_direction_id, it.from_location_id,
                   it.to_direction_id, it.to_location_id,
                   m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name,
                   fd.name AS from_direction_name, fl.name AS from_location_name,
                   td.name AS to_direction_name, tl.name AS to_location_name
            FROM transfer_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions fd ON fd.id = it.from_direction_id
            JOIN locations fl ON fl.id = it.from_location_id
            JOIN directions td ON td.id = it.to_direction_id
            JOIN locations tl ON tl.id = it.to_location_id
            WHERE it.transfer_id = $1
            ORDER BY m.name
            "#,
        )
        .bind(transfer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(TransferDetails {
            transfer: Transfer {
                id: header.0,
                date: header.1,
                document_number: header.2,
                responsible_id: header.3,
                created_at: header.5,
            },
            responsible_name: header.4,
            items: items.into_iter().map(TransferItemDetails::from).collect(),
        })
    }

    /// Delete a transfer document, reversing both deltas of every item
    pub async fn delete_transfer(&self, transfer_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let items = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid, Uuid, Uuid)>(
            r#"
            SELECT material_id, quantity, from_direction_id, from_location_id,
                   to_direction_id, to_location_id
            FROM transfer_items WHERE transfer_id = $1
            "#,
        )
        .bind(transfer_id)
        .fetch_all(&mut *tx)
        .await?;

        for item in items {
            let effect = ItemEffect::Transfer {
                material_id: item.0,
                quantity: item.1,
                from_direction_id: item.2,
                from_location_id: item.3,
                to_direction_id: item.4,
                to_location_id: item.5,
            };
            LedgerService::on_item_deleted(&mut tx, &effect).await?;
        }

        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(transfer_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transfer".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Add one item to an existing transfer document
    pub async fn add_item(
        &self,
        transfer_id: Uuid,
        input: TransferItemInput,
    ) -> AppResult<TransferItemDetails> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM transfers WHERE id = $1)")
                .bind(transfer_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Transfer".to_string()));
        }

        let mut tx = self.db.begin().await?;
        let item_id = Self::insert_item(&mut tx, transfer_id, &input).await?;
        tx.commit().await?;

        self.get_item(transfer_id, item_id).await
    }

    /// Delete one item, reversing both of its deltas
    pub async fn delete_item(&self, transfer_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid, Uuid, Uuid)>(
            r#"
            SELECT material_id, quantity, from_direction_id, from_location_id,
                   to_direction_id, to_location_id
            FROM transfer_items WHERE id = $1 AND transfer_id = $2
            "#,
        )
        .bind(item_id)
        .bind(transfer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer item".to_string()))?;

        let effect = ItemEffect::Transfer {
            material_id: item.0,
            quantity: item.1,
            from_direction_id: item.2,
            from_location_id: item.3,
            to_direction_id: item.4,
            to_location_id: item.5,
        };
        LedgerService::on_item_deleted(&mut tx, &effect).await?;

        sqlx::query("DELETE FROM transfer_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_item(&self, transfer_id: Uuid, item_id: Uuid) -> AppResult<TransferItemDetails> {
        let row = sqlx::query_as::<_, TransferItemRow>(
            r#"
            SELECT it.id, it.transfer_id, it.material_id, it.quantity,
                   it.from_direction_id, it.from_location_id,
                   it.to_direction_id, it.to_location_id,
                   m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name,
                   fd.name AS from_direction_name, fl.name AS from_location_name,
                   td.name AS to_direction_name, tl.name AS to_location_name
            FROM transfer_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions fd ON fd.id = it.from_direction_id
            JOIN locations fl ON fl.id = it.from_location_id
            JOIN directions td ON td.id = it.to_direction_id
            JOIN locations tl ON tl.id = it.to_location_id
            WHERE it.id = $1 AND it.transfer_id = $2
            "#,
        )
        .bind(item_id)
        .bind(transfer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer item".to_string()))?;

        Ok(row.into())
    }

    /// Validate, insert and ledger-move one item inside the transaction
    async fn insert_item(
        tx: &mut Transaction<'_, Postgres>,
        transfer_id: Uuid,
        input: &TransferItemInput,
    ) -> AppResult<Uuid> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        validate_transfer_endpoints(
            input.from_direction_id,
            input.from_location_id,
            input.to_direction_id,
            input.to_location_id,
        )
        .map_err(|msg| AppError::Validation {
            field: "to_location_id".to_string(),
            message: msg.to_string(),
        })?;

        validate_item_refs(
            tx,
            input.material_id,
            input.from_direction_id,
            input.from_location_id,
        )
        .await?;
        validate_item_refs(
            tx,
            input.material_id,
            input.to_direction_id,
            input.to_location_id,
        )
        .await?;

        // Caller-side sufficiency check at the source key
        let available = StockService::quantity_at(tx, &input.source_key()).await?;
        if available < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "requested {} but only {} available at the source",
                input.quantity, available
            )));
        }

        let item_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transfer_items (transfer_id, material_id, quantity,
                                        from_direction_id, from_location_id,
                                        to_direction_id, to_location_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(transfer_id)
        .bind(input.material_id)
        .bind(input.quantity)
        .bind(input.from_direction_id)
        .bind(input.from_location_id)
        .bind(input.to_direction_id)
        .bind(input.to_location_id)
        .fetch_one(&mut **tx)
        .await?;

        LedgerService::on_item_created(tx, &input.effect()).await?;

        Ok(item_id)
    }
}
