//! Incoming stock document models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An incoming stock document header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub supplier_id: Uuid,
    pub responsible_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One line of an incoming stock document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeItem {
    pub id: Uuid,
    pub income_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub direction_id: Uuid,
    pub location_id: Uuid,
}
