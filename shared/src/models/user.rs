//! User models
//!
//! Documents record a responsible user. Account management beyond this is
//! out of scope, so the model carries no credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user who can be responsible for documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
