//! Bulk CSV import of incoming stock
//!
//! Each data row becomes one income header with a single line item, created
//! through the same path as interactive entry so the ledger update core
//! fires per item. Malformed or unresolved rows are skipped and reported
//! per row; a rejected row never leaves a partial document behind.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{ImportReport, ImportRow, ImportRowError};
use crate::services::income::{validate_responsible, IncomeItemInput, IncomeService};

/// CSV income import service
#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

/// An import row with all references resolved to ids
#[derive(Debug)]
struct ResolvedRow {
    row: ImportRow,
    supplier_id: Uuid,
    material_id: Uuid,
    direction_id: Uuid,
    location_id: Uuid,
}

impl ImportService {
    /// Create a new ImportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Import incomes from CSV text
    ///
    /// The first record is treated as a header row. Row numbers in the
    /// report are 1-based over the data rows.
    pub async fn import_incomes(
        &self,
        csv_text: &str,
        responsible_id: Uuid,
    ) -> AppResult<ImportReport> {
        validate_responsible(&self.db, responsible_id).await?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let mut imported = 0;
        let mut errors = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let row_number = index + 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    errors.push(ImportRowError {
                        row: row_number,
                        message: format!("unreadable row: {}", e),
                    });
                    continue;
                }
            };

            let fields: Vec<&str> = record.iter().collect();
            let parsed = match ImportRow::parse(&fields) {
                Ok(parsed) => parsed,
                Err(e) => {
                    errors.push(ImportRowError {
                        row: row_number,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let resolved = match self.resolve(parsed).await {
                Ok(resolved) => resolved,
                Err(message) => {
                    errors.push(ImportRowError {
                        row: row_number,
                        message,
                    });
                    continue;
                }
            };

            match self.persist(&resolved, responsible_id).await {
                Ok(()) => imported += 1,
                Err(e) => {
                    tracing::warn!("import row {} failed: {:?}", row_number, e);
                    errors.push(ImportRowError {
                        row: row_number,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(ImportReport {
            imported,
            skipped: errors.len(),
            errors,
        })
    }

    /// Resolve the row's names to catalog ids
    async fn resolve(&self, row: ImportRow) -> Result<ResolvedRow, String> {
        let supplier_id = self
            .lookup("SELECT id FROM suppliers WHERE name = $1", &row.supplier)
            .await?
            .ok_or_else(|| format!("unknown supplier: {:?}", row.supplier))?;

        let material_id = self
            .lookup(
                "SELECT id FROM materials WHERE article = $1",
                &row.material_article,
            )
            .await?
            .ok_or_else(|| format!("unknown material article: {:?}", row.material_article))?;

        let direction_id = self
            .lookup("SELECT id FROM directions WHERE name = $1", &row.direction)
            .await?
            .ok_or_else(|| format!("unknown direction: {:?}", row.direction))?;

        let location_id = self
            .lookup("SELECT id FROM locations WHERE name = $1", &row.location)
            .await?
            .ok_or_else(|| format!("unknown location: {:?}", row.location))?;

        Ok(ResolvedRow {
            row,
            supplier_id,
            material_id,
            direction_id,
            location_id,
        })
    }

    async fn lookup(&self, query: &str, value: &str) -> Result<Option<Uuid>, String> {
        sqlx::query_scalar::<_, Uuid>(query)
            .bind(value)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| format!("lookup failed: {}", e))
    }

    /// Create the header and its single item in one transaction
    async fn persist(&self, resolved: &ResolvedRow, responsible_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let income_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO incomes (date, document_number, supplier_id, responsible_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(resolved.row.date)
        .bind(&resolved.row.document_number)
        .bind(resolved.supplier_id)
        .bind(responsible_id)
        .fetch_one(&mut *tx)
        .await?;

        let input = IncomeItemInput {
            material_id: resolved.material_id,
            quantity: resolved.row.quantity,
            direction_id: resolved.direction_id,
            location_id: resolved.location_id,
        };
        IncomeService::insert_item(&mut tx, income_id, &input).await?;

        tx.commit().await?;

        Ok(())
    }
}
