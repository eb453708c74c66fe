//! Login endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::models::User;
use shared::AppError;

use crate::auth::{jwt, password};
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /login
///
/// Unknown user, wrong password and deactivated account all answer
/// with the same 401 so probing reveals nothing about which usernames
/// exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let Some(user) = db::users::find_by_username(&state.pool, &req.username).await? else {
        return Err(AppError::invalid_credentials().into());
    };

    if !user.active || !password::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = jwt::create_token(&user, &state.jwt_secret).map_err(|e| {
        tracing::error!("failed to sign JWT: {e}");
        AppError::internal("Failed to issue token")
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "login");
    Ok(Json(LoginResponse { token, user }))
}
