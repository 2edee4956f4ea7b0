//! Stock ledger models and the delta core
//!
//! The ledger is a materialized aggregate: one signed quantity per
//! (material, direction, location) key. Every line-item creation or deletion
//! maps to a set of signed deltas via [`ItemEffect::deltas`]; the backend
//! applies them with an atomic upsert. The invariant is that a key's quantity
//! always equals the signed sum of the contributions of all currently
//! existing line items referencing it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one ledger row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StockKey {
    pub material_id: Uuid,
    pub direction_id: Uuid,
    pub location_id: Uuid,
}

impl StockKey {
    pub fn new(material_id: Uuid, direction_id: Uuid, location_id: Uuid) -> Self {
        Self {
            material_id,
            direction_id,
            location_id,
        }
    }
}

/// One signed quantity change against a ledger row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockDelta {
    pub key: StockKey,
    pub quantity: Decimal,
}

impl StockDelta {
    pub fn new(key: StockKey, quantity: Decimal) -> Self {
        Self { key, quantity }
    }

    /// The delta that exactly undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            key: self.key,
            quantity: -self.quantity,
        }
    }
}

/// The ledger-relevant content of one line item
///
/// Quantities are the item's stored (positive) quantities; the sign table
/// lives in [`ItemEffect::deltas`]. Editing an item in place is not a
/// supported operation — callers must delete and recreate, so deletion can
/// stay the exact inverse of creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemEffect {
    /// Incoming stock: credits (direction, location)
    Income {
        material_id: Uuid,
        direction_id: Uuid,
        location_id: Uuid,
        quantity: Decimal,
    },
    /// Write-off: debits (direction, location)
    WriteOff {
        material_id: Uuid,
        direction_id: Uuid,
        location_id: Uuid,
        quantity: Decimal,
    },
    /// Transfer: debits the source pair and credits the destination pair
    Transfer {
        material_id: Uuid,
        quantity: Decimal,
        from_direction_id: Uuid,
        from_location_id: Uuid,
        to_direction_id: Uuid,
        to_location_id: Uuid,
    },
}

impl ItemEffect {
    /// The signed deltas this item contributes to the ledger while it exists
    ///
    /// Income: +q. Write-off: −q. Transfer: −q at the source key and +q at
    /// the destination key, issued together so the caller can apply both in
    /// one transaction.
    pub fn deltas(&self) -> Vec<StockDelta> {
        match *self {
            ItemEffect::Income {
                material_id,
                direction_id,
                location_id,
                quantity,
            } => vec![StockDelta::new(
                StockKey::new(material_id, direction_id, location_id),
                quantity,
            )],
            ItemEffect::WriteOff {
                material_id,
                direction_id,
                location_id,
                quantity,
            } => vec![StockDelta::new(
                StockKey::new(material_id, direction_id, location_id),
                -quantity,
            )],
            ItemEffect::Transfer {
                material_id,
                quantity,
                from_direction_id,
                from_location_id,
                to_direction_id,
                to_location_id,
            } => vec![
                StockDelta::new(
                    StockKey::new(material_id, from_direction_id, from_location_id),
                    -quantity,
                ),
                StockDelta::new(
                    StockKey::new(material_id, to_direction_id, to_location_id),
                    quantity,
                ),
            ],
        }
    }

    /// The deltas to apply when the item is deleted: the exact inverse of
    /// [`ItemEffect::deltas`]
    pub fn inverse_deltas(&self) -> Vec<StockDelta> {
        self.deltas().iter().map(StockDelta::inverse).collect()
    }
}

/// One materialized ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    pub id: Uuid,
    pub material_id: Uuid,
    pub direction_id: Uuid,
    pub location_id: Uuid,
    pub quantity: Decimal,
}

impl StockLevel {
    pub fn key(&self) -> StockKey {
        StockKey::new(self.material_id, self.direction_id, self.location_id)
    }
}
