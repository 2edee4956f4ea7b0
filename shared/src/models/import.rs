//! CSV import models
//!
//! Bulk income import consumes tabular rows with the columns
//! `date, document_number, supplier, material_article, quantity, direction,
//! location`. Parsing is separated from persistence so malformed rows can be
//! rejected (and reported per row) before anything touches the database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Expected column count of an import row
pub const IMPORT_COLUMNS: usize = 7;

/// Reasons an import row is rejected during parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowParseError {
    #[error("expected {IMPORT_COLUMNS} columns, got {0}")]
    ColumnCount(usize),
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// A parsed, well-formed import row (names still unresolved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub supplier: String,
    pub material_article: String,
    pub quantity: Decimal,
    pub direction: String,
    pub location: String,
}

impl ImportRow {
    /// Parse one record's fields, validating shape and value ranges
    pub fn parse(fields: &[&str]) -> Result<Self, RowParseError> {
        if fields.len() != IMPORT_COLUMNS {
            return Err(RowParseError::ColumnCount(fields.len()));
        }

        let date = NaiveDate::parse_from_str(fields[0].trim(), "%Y-%m-%d")
            .map_err(|_| RowParseError::InvalidDate(fields[0].to_string()))?;

        let document_number = match fields[1].trim() {
            "" => None,
            number => Some(number.to_string()),
        };

        let supplier = non_empty(fields[2], "supplier")?;
        let material_article = non_empty(fields[3], "material_article")?;

        let quantity = Decimal::from_str(fields[4].trim())
            .map_err(|_| RowParseError::InvalidQuantity(fields[4].to_string()))?;
        if quantity <= Decimal::ZERO {
            return Err(RowParseError::NonPositiveQuantity);
        }

        let direction = non_empty(fields[5], "direction")?;
        let location = non_empty(fields[6], "location")?;

        Ok(Self {
            date,
            document_number,
            supplier,
            material_article,
            quantity,
            direction,
            location,
        })
    }
}

fn non_empty(field: &str, name: &'static str) -> Result<String, RowParseError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Err(RowParseError::EmptyField(name));
    }
    Ok(trimmed.to_string())
}

/// Error for one rejected import row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowError {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    pub message: String,
}

/// Outcome of a bulk import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}
