//! Material catalog service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Material, MaterialWithUnit};
use shared::validation::validate_name;

/// Material service
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Input for creating or updating a material
#[derive(Debug, Deserialize)]
pub struct MaterialInput {
    pub name: String,
    pub article: String,
    pub unit_id: Uuid,
}

/// Row shape for material listings
#[derive(Debug, sqlx::FromRow)]
struct MaterialRow {
    id: Uuid,
    name: String,
    article: String,
    unit_id: Uuid,
    unit_name: String,
    created_at: DateTime<Utc>,
}

impl From<MaterialRow> for MaterialWithUnit {
    fn from(row: MaterialRow) -> Self {
        MaterialWithUnit {
            material: Material {
                id: row.id,
                name: row.name,
                article: row.article,
                unit_id: row.unit_id,
                created_at: row.created_at,
            },
            unit_name: row.unit_name,
        }
    }
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List materials, optionally filtered by a name substring
    pub async fn list_materials(&self, query: Option<&str>) -> AppResult<Vec<MaterialWithUnit>> {
        let pattern = query
            .map(|q| format!("%{}%", q.trim()))
            .unwrap_or_else(|| "%".to_string());

        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT m.id, m.name, m.article, m.unit_id, u.name AS unit_name, m.created_at
            FROM materials m
            JOIN units u ON u.id = m.unit_id
            WHERE m.name ILIKE $1
            ORDER BY m.name
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MaterialWithUnit::from).collect())
    }

    /// Create a material
    pub async fn create_material(&self, input: MaterialInput) -> AppResult<MaterialWithUnit> {
        self.validate_input(&input, None).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO materials (name, article, unit_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(input.name.trim())
        .bind(input.article.trim())
        .bind(input.unit_id)
        .fetch_one(&self.db)
        .await?;

        self.get_material(id).await
    }

    /// Get a material with its unit name
    pub async fn get_material(&self, material_id: Uuid) -> AppResult<MaterialWithUnit> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT m.id, m.name, m.article, m.unit_id, u.name AS unit_name, m.created_at
            FROM materials m
            JOIN units u ON u.id = m.unit_id
            WHERE m.id = $1
            "#,
        )
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(row.into())
    }

    /// Update a material
    pub async fn update_material(
        &self,
        material_id: Uuid,
        input: MaterialInput,
    ) -> AppResult<MaterialWithUnit> {
        self.validate_input(&input, Some(material_id)).await?;

        let result = sqlx::query("UPDATE materials SET name = $1, article = $2, unit_id = $3 WHERE id = $4")
            .bind(input.name.trim())
            .bind(input.article.trim())
            .bind(input.unit_id)
            .bind(material_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        self.get_material(material_id).await
    }

    /// Delete a material; restricted while any line item references it
    pub async fn delete_material(&self, material_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM income_items WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM write_off_items WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM transfer_items WHERE material_id = $1)
            "#,
        )
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Referenced {
                entity: "Material".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(material_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Validate name/article and uniqueness, and that the unit exists
    async fn validate_input(&self, input: &MaterialInput, exclude: Option<Uuid>) -> AppResult<()> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_name(&input.article).map_err(|_| AppError::Validation {
            field: "article".to_string(),
            message: "Article must not be empty".to_string(),
        })?;

        let unit_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM units WHERE id = $1)")
                .bind(input.unit_id)
                .fetch_one(&self.db)
                .await?;

        if !unit_exists {
            return Err(AppError::NotFound("Unit".to_string()));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM materials
                          WHERE (name = $1 OR article = $2)
                            AND ($3::uuid IS NULL OR id <> $3))
            "#,
        )
        .bind(input.name.trim())
        .bind(input.article.trim())
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry("name or article".to_string()));
        }

        Ok(())
    }
}
