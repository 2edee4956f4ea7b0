//! Material models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    /// Unique article code (SKU)
    pub article: String,
    pub unit_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Material with its unit name resolved, as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialWithUnit {
    #[serde(flatten)]
    pub material: Material,
    pub unit_name: String,
}
