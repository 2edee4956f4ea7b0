//! Inter-location transfer document models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transfer document header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub date: NaiveDate,
    pub document_number: Option<String>,
    pub responsible_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One line of a transfer document
///
/// The (from_direction, from_location) and (to_direction, to_location) pairs
/// must differ: a transfer has to change location or direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferItem {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub from_direction_id: Uuid,
    pub from_location_id: Uuid,
    pub to_direction_id: Uuid,
    pub to_location_id: Uuid,
}

impl TransferItem {
    /// Whether source and destination are the same (direction, location) pair
    pub fn endpoints_identical(&self) -> bool {
        self.from_direction_id == self.to_direction_id
            && self.from_location_id == self.to_location_id
    }
}
