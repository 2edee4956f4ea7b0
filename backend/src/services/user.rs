//! User service
//!
//! Minimal account bookkeeping: documents need a responsible user to point
//! at. Credentials and sessions are out of scope.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;
use shared::validation::validate_name;

/// User service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Input for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub full_name: String,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, username, full_name, created_at FROM users ORDER BY username",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, username, full_name, created_at)| User {
                id,
                username,
                full_name,
                created_at,
            })
            .collect())
    }

    /// Create a user
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        validate_name(&input.username).map_err(|_| AppError::Validation {
            field: "username".to_string(),
            message: "Username must not be empty".to_string(),
        })?;

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(input.username.trim())
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let row = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            r#"
            INSERT INTO users (username, full_name)
            VALUES ($1, $2)
            RETURNING id, username, full_name, created_at
            "#,
        )
        .bind(input.username.trim())
        .bind(input.full_name.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(User {
            id: row.0,
            username: row.1,
            full_name: row.2,
            created_at: row.3,
        })
    }
}
