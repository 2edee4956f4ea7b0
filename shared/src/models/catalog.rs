//! Reference catalog models: units, directions, locations, suppliers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of measure (kg, pcs, m, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A cost/usage direction (project, order, cost center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Direction {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Types of storage locations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Warehouse,
    Production,
    Office,
    Other,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Warehouse => "warehouse",
            LocationType::Production => "production",
            LocationType::Office => "office",
            LocationType::Other => "other",
        }
    }
}

impl std::str::FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warehouse" => Ok(LocationType::Warehouse),
            "production" => Ok(LocationType::Production),
            "office" => Ok(LocationType::Office),
            "other" => Ok(LocationType::Other),
            _ => Err(format!("unknown location type: {}", s)),
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storage location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub location_type: LocationType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A material supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_last_name: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_middle_name: Option<String>,
    /// Taxpayer identification number
    pub tax_id: Option<String>,
    /// Tax registration reason code
    pub tax_reg_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// Full contact person name, skipping empty parts
    pub fn contact_name(&self) -> String {
        [
            self.contact_last_name.as_deref(),
            self.contact_first_name.as_deref(),
            self.contact_middle_name.as_deref(),
        ]
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}
