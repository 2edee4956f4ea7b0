//! Write-off document models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A write-off document header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOff {
    pub id: Uuid,
    pub date: NaiveDate,
    pub reason: String,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One line of a write-off document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOffItem {
    pub id: Uuid,
    pub writeoff_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub direction_id: Uuid,
    pub location_id: Uuid,
}
