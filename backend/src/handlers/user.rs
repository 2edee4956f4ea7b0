//! HTTP handlers for user endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::User;
use crate::services::user::{CreateUserInput, UserService};
use crate::AppState;

/// List users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let service = UserService::new(state.db);
    Ok(Json(service.list_users().await?))
}

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    Ok(Json(service.create_user(input).await?))
}
