//! Incoming stock document service
//!
//! Every successful item insert triggers the ledger update core once, inside
//! the same transaction as the item row; every item removal triggers the
//! inverse. Header deletion reverses each owned item before the cascade
//! removes the rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Income, IncomeItem, ItemEffect};
use crate::services::ledger::LedgerService;
use shared::validation::validate_quantity;

/// Incoming stock document service
#[derive(Clone)]
pub struct IncomeService {
    db: PgPool,
}

/// Input for one income line item
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeItemInput {
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub direction_id: Uuid,
    pub location_id: Uuid,
}

/// Input for creating an income document
#[derive(Debug, Deserialize)]
pub struct CreateIncomeInput {
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub supplier_id: Uuid,
    pub responsible_id: Uuid,
    #[serde(default)]
    pub items: Vec<IncomeItemInput>,
}

/// Income header as listed, with names resolved
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct IncomeHeader {
    pub id: Uuid,
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub responsible_id: Uuid,
    pub responsible_name: String,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Full income document with item details
#[derive(Debug, Serialize)]
pub struct IncomeDetails {
    #[serde(flatten)]
    pub income: Income,
    pub supplier_name: String,
    pub responsible_name: String,
    pub items: Vec<IncomeItemDetails>,
}

/// Income line item with names resolved
#[derive(Debug, Serialize)]
pub struct IncomeItemDetails {
    #[serde(flatten)]
    pub item: IncomeItem,
    pub material_name: String,
    pub material_article: String,
    pub unit_name: String,
    pub direction_name: String,
    pub location_name: String,
}

/// Row shape for income item queries
#[derive(Debug, sqlx::FromRow)]
struct IncomeItemRow {
    id: Uuid,
    income_id: Uuid,
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

impl From<IncomeItemRow> for IncomeItemDetails {
    fn from(row: IncomeItemRow) -> Self {
        IncomeItemDetails {
            item: IncomeItem {
                id: row.id,
                income_id: row.income_id,
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

impl IncomeItemInput {
    fn effect(&self) -> ItemEffect {
        ItemEffect::Income {
            material_id: self.material_id,
            direction_id: self.direction_id,
            location_id: self.location_id,
            quantity: self.quantity,
        }
    }
}

impl IncomeService {
    /// Create a new IncomeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List income document headers, newest first
    pub async fn list_incomes(&self) -> AppResult<Vec<IncomeHeader>> {
        let headers = sqlx::query_as::<_, IncomeHeader>(
            r#"
            SELECT i.id, i.date, i.document_number, i.supplier_id, s.name AS supplier_name,
                   i.responsible_id, u.full_name AS responsible_name,
                   (SELECT COUNT(*) FROM income_items it WHERE it.income_id = i.id) AS item_count,
                   i.created_at
            FROM incomes i
            JOIN suppliers s ON s.id = i.supplier_id
            JOIN users u ON u.id = i.responsible_id
            ORDER BY i.date DESC, i.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(headers)
    }

    /// Create an income document with its items
    pub async fn create_income(&self, input: CreateIncomeInput) -> AppResult<IncomeDetails> {
        let supplier_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
        )
        .bind(input.supplier_id)
        .fetch_one(&self.db)
        .await?;

        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        validate_responsible(&self.db, input.responsible_id).await?;

        // Start transaction
        let mut tx = self.db.begin().await?;

        let income_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO incomes (date, document_number, supplier_id, responsible_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.date)
        .bind(&input.document_number)
        .bind(input.supplier_id)
        .bind(input.responsible_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            Self::insert_item(&mut tx, income_id, item).await?;
        }

        tx.commit().await?;

        self.get_income(income_id).await
    }

    /// Get an income document with item details
    pub async fn get_income(&self, income_id: Uuid) -> AppResult<IncomeDetails> {
        let header = sqlx::query_as::<_, (Uuid, NaiveDate, Option<String>, Uuid, String, Uuid, String, DateTime<Utc>)>(
            r#"
            SELECT i.id, i.date, i.document_number, i.supplier_id, s.name,
                   i.responsible_id, u.full_name, i.created_at
            FROM incomes i
            JOIN suppliers s ON s.id = i.supplier_id
            JOIN users u ON u.id = i.responsible_id
            WHERE i.id = $1
            "#,
        )
        .bind(income_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Income".to_string()))?;

        let items = sqlx::query_as::<_, IncomeItemRow>(
            r#"
            SELECT it.id, it.income_id, it.material_id, it.quantity, it.direction_id,
                   it.location_id, m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name, d.name AS direction_name, l.name AS location_name
            FROM income_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions d ON d.id = it.direction_id
            JOIN locations l ON l.id = it.location_id
            WHERE it.income_id = $1
            ORDER BY m.name
            "#,
        )
        .bind(income_id)
        .fetch_all(&self.db)
        .await?;

        Ok(IncomeDetails {
            income: Income {
                id: header.0,
                date: header.1,
                document_number: header.2,
                supplier_id: header.3,
                responsible_id: header.5,
                created_at: header.7,
            },
            supplier_name: header.4,
            responsible_name: header.6,
            items: items.into_iter().map(IncomeItemDetails::from).collect(),
        })
    }

    /// Delete an income document, reversing every item's ledger effect
    pub async fn delete_income(&self, income_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let items = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid)>(
            "SELECT material_id, quantity, direction_id, location_id
             FROM income_items WHERE income_id = $1",
        )
        .bind(income_id)
        .fetch_all(&mut *tx)
        .await?;

        for (material_id, quantity, direction_id, location_id) in items {
            let effect = ItemEffect::Income {
                material_id,
                direction_id,
                location_id,
                quantity,
            };
            LedgerService::on_item_deleted(&mut tx, &effect).await?;
        }

        // Cascade removes the item rows
        let result = sqlx::query("DELETE FROM incomes WHERE id = $1")
            .bind(income_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Income".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Add one item to an existing income document
    pub async fn add_item(
        &self,
        income_id: Uuid,
        input: IncomeItemInput,
    ) -> AppResult<IncomeItemDetails> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM incomes WHERE id = $1)")
                .bind(income_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Income".to_string()));
        }

        let mut tx = self.db.begin().await?;
        let item_id = Self::insert_item(&mut tx, income_id, &input).await?;
        tx.commit().await?;

        self.get_item(income_id, item_id).await
    }

    /// Delete one item, reversing its ledger effect
    pub async fn delete_item(&self, income_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, (Uuid, Decimal, Uuid, Uuid)>(
            "SELECT material_id, quantity, direction_id, location_id
             FROM income_items WHERE id = $1 AND income_id = $2",
        )
        .bind(item_id)
        .bind(income_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Income item".to_string()))?;

        let effect = ItemEffect::Income {
            material_id: item.0,
            direction_id: item.2,
            location_id: item.3,
            quantity: item.1,
        };
        LedgerService::on_item_deleted(&mut tx, &effect).await?;

        sqlx::query("DELETE FROM income_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Fetch one item with names resolved
    async fn get_item(&self, income_id: Uuid, item_id: Uuid) -> AppResult<IncomeItemDetails> {
        let row = sqlx::query_as::<_, IncomeItemRow>(
            r#"
            SELECT it.id, it.income_id, it.material_id, it.quantity, it.direction_id,
                   it.location_id, m.name AS material_name, m.article AS material_article,
                   un.name AS unit_name, d.name AS direction_name, l.name AS location_name
            FROM income_items it
            JOIN materials m ON m.id = it.material_id
            JOIN units un ON un.id = m.unit_id
            JOIN directions d ON d.id = it.direction_id
            JOIN locations l ON l.id = it.location_id
            WHERE it.id = $1 AND it.income_id = $2
            "#,
        )
        .bind(item_id)
        .bind(income_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Income item".to_string()))?;

        Ok(row.into())
    }

    /// Validate, insert and ledger-credit one item inside the transaction
    pub(crate) async fn insert_item(
        tx: &mut Transaction<'_, Postgres>,
        income_id: Uuid,
        input: &IncomeItemInput,
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

        let item_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO income_items (income_id, material_id, quantity, direction_id, location_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(income_id)
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

/// Validate that a responsible user exists
pub(crate) async fn validate_responsible(db: &PgPool, responsible_id: Uuid) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(responsible_id)
        .fetch_one(db)
        .await?;

    if !exists {
        return Err(AppError::NotFound("User".to_string()));
    }
    Ok(())
}

/// Validate that an item's material, direction and location all exist
///
/// Referential errors are rejected here, before any event reaches the ledger
/// core.
pub(crate) async fn validate_item_refs(
    tx: &mut Transaction<'_, Postgres>,
    material_id: Uuid,
    direction_id: Uuid,
    location_id: Uuid,
) -> AppResult<()> {
    let (material, direction, location) = sqlx::query_as::<_, (bool, bool, bool)>(
        r#"
        SELECT EXISTS(SELECT 1 FROM materials WHERE id = $1),
               EXISTS(SELECT 1 FROM directions WHERE id = $2),
               EXISTS(SELECT 1 FROM locations WHERE id = $3)
        "#,
    )
    .bind(material_id)
    .bind(direction_id)
    .bind(location_id)
    .fetch_one(&mut **tx)
    .await?;

    if !material {
        return Err(AppError::NotFound("Material".to_string()));
    }
    if !direction {
        return Err(AppError::NotFound("Direction".to_string()));
    }
    if !location {
        return Err(AppError::NotFound("Location".to_string()));
    }
    Ok(())
}
