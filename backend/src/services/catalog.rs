//! Reference catalog service: units, directions, locations, suppliers
//!
//! Catalog rows are plain lookup data. The only rule worth enforcing here is
//! protect-on-delete: a row referenced by materials or documents cannot be
//! removed. The schema backs this with ON DELETE RESTRICT; the service checks
//! first so the caller gets a clean conflict error instead of a raw database
//! failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Direction, Location, LocationType, Supplier, Unit};
use shared::validation::validate_name;

/// Catalog service for reference data
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Input for creating or renaming a unit or direction
#[derive(Debug, Deserialize)]
pub struct NamedInput {
    pub name: String,
}

/// Input for creating or updating a location
#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub name: String,
    pub address: Option<String>,
    pub location_type: Option<LocationType>,
    pub is_active: Option<bool>,
}

/// Input for creating or updating a supplier
#[derive(Debug, Deserialize, Validate)]
pub struct SupplierInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub contact_last_name: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_middle_name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_reg_code: Option<String>,
}

/// Row shape for suppliers
#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    contact_last_name: Option<String>,
    contact_first_name: Option<String>,
    contact_middle_name: Option<String>,
    tax_id: Option<String>,
    tax_reg_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            contact_last_name: row.contact_last_name,
            contact_first_name: row.contact_first_name,
            contact_middle_name: row.contact_middle_name,
            tax_id: row.tax_id,
            tax_reg_code: row.tax_reg_code,
            created_at: row.created_at,
        }
    }
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Units
    // ========================================================================

    /// List all units of measure
    pub async fn list_units(&self) -> AppResult<Vec<Unit>> {
        let rows = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM units ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at)| Unit {
                id,
                name,
                created_at,
            })
            .collect())
    }

    /// Create a unit of measure
    pub async fn create_unit(&self, input: NamedInput) -> AppResult<Unit> {
        self.validate_named(&input, "units", None).await?;

        let (id, name, created_at) = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "INSERT INTO units (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(Unit {
            id,
            name,
            created_at,
        })
    }

    /// Get a unit by id
    pub async fn get_unit(&self, unit_id: Uuid) -> AppResult<Unit> {
        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM units WHERE id = $1",
        )
        .bind(unit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit".to_string()))?;

        Ok(Unit {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    /// Rename a unit
    pub async fn update_unit(&self, unit_id: Uuid, input: NamedInput) -> AppResult<Unit> {
        self.validate_named(&input, "units", Some(unit_id)).await?;

        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "UPDATE units SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
        )
        .bind(input.name.trim())
        .bind(unit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit".to_string()))?;

        Ok(Unit {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    /// Delete a unit; restricted while any material references it
    pub async fn delete_unit(&self, unit_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM materials WHERE unit_id = $1)",
        )
        .bind(unit_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Referenced {
                entity: "Unit".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(unit_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Unit".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Directions
    // ========================================================================

    /// List all directions
    pub async fn list_directions(&self) -> AppResult<Vec<Direction>> {
        let rows = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM directions ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at)| Direction {
                id,
                name,
                created_at,
            })
            .collect())
    }

    /// Create a direction
    pub async fn create_direction(&self, input: NamedInput) -> AppResult<Direction> {
        self.validate_named(&input, "directions", None).await?;

        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "INSERT INTO directions (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(Direction {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    /// Get a direction by id
    pub async fn get_direction(&self, direction_id: Uuid) -> AppResult<Direction> {
        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM directions WHERE id = $1",
        )
        .bind(direction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Direction".to_string()))?;

        Ok(Direction {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    /// Rename a direction
    pub async fn update_direction(
        &self,
        direction_id: Uuid,
        input: NamedInput,
    ) -> AppResult<Direction> {
        self.validate_named(&input, "directions", Some(direction_id))
            .await?;

        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "UPDATE directions SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
        )
        .bind(input.name.trim())
        .bind(direction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Direction".to_string()))?;

        Ok(Direction {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    /// Delete a direction; restricted while any line item references it
    pub async fn delete_direction(&self, direction_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM income_items WHERE direction_id = $1)
                OR EXISTS(SELECT 1 FROM write_off_items WHERE direction_id = $1)
                OR EXISTS(SELECT 1 FROM transfer_items
                          WHERE from_direction_id = $1 OR to_direction_id = $1)
            "#,
        )
        .bind(direction_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Referenced {
                entity: "Direction".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM directions WHERE id = $1")
            .bind(direction_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Direction".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Locations
    // ========================================================================

    /// List all storage locations
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, (Uuid, String, Option<String>, String, bool, DateTime<Utc>)>(
            "SELECT id, name, address, location_type, is_active, created_at
             FROM locations ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Self::location_from_row).collect()
    }

    /// Create a storage location
    pub async fn create_location(&self, input: LocationInput) -> AppResult<Location> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let location_type = input.location_type.unwrap_or(LocationType::Warehouse);
        let is_active = input.is_active.unwrap_or(true);

        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, String, bool, DateTime<Utc>)>(
            r#"
            INSERT INTO locations (name, address, location_type, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, location_type, is_active, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.address)
        .bind(location_type.as_str())
        .bind(is_active)
        .fetch_one(&self.db)
        .await?;

        Self::location_from_row(row)
    }

    /// Get a location by id
    pub async fn get_location(&self, location_id: Uuid) -> AppResult<Location> {
        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, String, bool, DateTime<Utc>)>(
            "SELECT id, name, address, location_type, is_active, created_at
             FROM locations WHERE id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        Self::location_from_row(row)
    }

    /// Update a location
    pub async fn update_location(
        &self,
        location_id: Uuid,
        input: LocationInput,
    ) -> AppResult<Location> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let existing = self.get_location(location_id).await?;
        let location_type = input.location_type.unwrap_or(existing.location_type);
        let is_active = input.is_active.unwrap_or(existing.is_active);
        let address = input.address.or(existing.address);

        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, String, bool, DateTime<Utc>)>(
            r#"
            UPDATE locations
            SET name = $1, address = $2, location_type = $3, is_active = $4
            WHERE id = $5
            RETURNING id, name, address, location_type, is_active, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&address)
        .bind(location_type.as_str())
        .bind(is_active)
        .bind(location_id)
        .fetch_one(&self.db)
        .await?;

        Self::location_from_row(row)
    }

    /// Delete a location; restricted while any line item references it
    pub async fn delete_location(&self, location_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM income_items WHERE location_id = $1)
                OR EXISTS(SELECT 1 FROM write_off_items WHERE location_id = $1)
                OR EXISTS(SELECT 1 FROM transfer_items
                          WHERE from_location_id = $1 OR to_location_id = $1)
            "#,
        )
        .bind(location_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Referenced {
                entity: "Location".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(location_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, phone, email, contact_last_name, contact_first_name,
                   contact_middle_name, tax_id, tax_reg_code, created_at
            FROM suppliers ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    /// Create a supplier
    pub async fn create_supplier(&self, input: SupplierInput) -> AppResult<Supplier> {
        input.validate().map_err(|e| AppError::Validation {
            field: "supplier".to_string(),
            message: e.to_string(),
        })?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, phone, email, contact_last_name, contact_first_name,
                                   contact_middle_name, tax_id, tax_reg_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, phone, email, contact_last_name, contact_first_name,
                      contact_middle_name, tax_id, tax_reg_code, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.contact_last_name)
        .bind(&input.contact_first_name)
        .bind(&input.contact_middle_name)
        .bind(&input.tax_id)
        .bind(&input.tax_reg_code)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a supplier by id
    pub async fn get_supplier(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, phone, email, contact_last_name, contact_first_name,
                   contact_middle_name, tax_id, tax_reg_code, created_at
            FROM suppliers WHERE id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(row.into())
    }

    /// Update a supplier
    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: SupplierInput,
    ) -> AppResult<Supplier> {
        input.validate().map_err(|e| AppError::Validation {
            field: "supplier".to_string(),
            message: e.to_string(),
        })?;

        let existing = self.get_supplier(supplier_id).await?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $1, phone = $2, email = $3, contact_last_name = $4,
                contact_first_name = $5, contact_middle_name = $6, tax_id = $7,
                tax_reg_code = $8
            WHERE id = $9
            RETURNING id, name, phone, email, contact_last_name, contact_first_name,
                      contact_middle_name, tax_id, tax_reg_code, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.phone.or(existing.phone))
        .bind(input.email.or(existing.email))
        .bind(input.contact_last_name.or(existing.contact_last_name))
        .bind(input.contact_first_name.or(existing.contact_first_name))
        .bind(input.contact_middle_name.or(existing.contact_middle_name))
        .bind(input.tax_id.or(existing.tax_id))
        .bind(input.tax_reg_code.or(existing.tax_reg_code))
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a supplier; restricted while any income document references it
    pub async fn delete_supplier(&self, supplier_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM incomes WHERE supplier_id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Referenced {
                entity: "Supplier".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn location_from_row(
        row: (Uuid, String, Option<String>, String, bool, DateTime<Utc>),
    ) -> AppResult<Location> {
        let location_type = LocationType::from_str(&row.3).map_err(AppError::Internal)?;
        Ok(Location {
            id: row.0,
            name: row.1,
            address: row.2,
            location_type,
            is_active: row.4,
            created_at: row.5,
        })
    }

    /// Shared name validation and uniqueness pre-check for units/directions
    async fn validate_named(
        &self,
        input: &NamedInput,
        table: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
            table
        );
        let duplicate = sqlx::query_scalar::<_, bool>(&query)
            .bind(input.name.trim())
            .bind(exclude)
            .fetch_one(&self.db)
            .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        Ok(())
    }
}
