//! User management endpoints (admin)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use shared::models::{Role, User};
use shared::AppError;

use crate::auth::middleware::require_admin;
use crate::auth::{password, AuthUser};
use crate::db;
use crate::db::audit::{AuditAction, AuditEntity};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::validate_storage_code;

const MIN_PASSWORD_LEN: usize = 4;

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<User>>, ServiceError> {
    require_admin(&user)?;
    Ok(Json(db::users::list(&state.pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub home_storage_code: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ServiceError> {
    require_admin(&user)?;
    let username = req.username.trim();
    if username.is_empty() || username.len() > 50 {
        return Err(AppError::bad_request("username must be 1-50 characters").into());
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }
    let home = normalize_home(req.home_storage_code)?;

    let hash = password::hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        AppError::internal("Failed to hash password")
    })?;

    match db::users::insert(&state.pool, username, &hash, req.role, home.as_deref()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) if db::is_unique_violation(&err) => {
            Err(AppError::conflict(format!("Username {username} already exists")).into())
        }
        Err(err) if db::is_foreign_key_violation(&err) => {
            Err(AppError::unprocessable("Unknown homeStorageCode").into())
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchUser {
    pub role: Option<Role>,
    pub active: Option<bool>,
    /// `Some(None)` clears the home storage
    #[serde(default, with = "double_option")]
    pub home_storage_code: Option<Option<String>>,
    pub password: Option<String>,
}

pub async fn patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<PatchUser>,
) -> Result<Json<User>, ServiceError> {
    require_admin(&user)?;
    if req
        .password
        .as_ref()
        .is_some_and(|p| p.len() < MIN_PASSWORD_LEN)
    {
        return Err(AppError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }
    let Some(existing) = db::users::find_by_id(&state.pool, id).await? else {
        return Err(AppError::not_found("User not found").into());
    };

    let role = req.role.unwrap_or(existing.role);
    let active = req.active.unwrap_or(existing.active);
    let home = match req.home_storage_code {
        Some(home) => normalize_home(home)?,
        None => existing.home_storage_code.clone(),
    };

    let updated = match db::users::update(&state.pool, id, role, active, home.as_deref()).await {
        Ok(updated) => updated.ok_or_else(|| AppError::not_found("User not found"))?,
        Err(err) if db::is_foreign_key_violation(&err) => {
            return Err(AppError::unprocessable("Unknown homeStorageCode").into());
        }
        Err(err) => return Err(err.into()),
    };

    if active != existing.active {
        let action = if active {
            AuditAction::UserActivated
        } else {
            AuditAction::UserDeactivated
        };
        db::audit::append(
            &state.pool,
            Some(user.id),
            action,
            AuditEntity::User,
            Some(id.to_string()),
            None,
        )
        .await;
    }

    let updated = match req.password {
        Some(new_password) => {
            let hash = password::hash_password(&new_password).map_err(|e| {
                tracing::error!("password hashing failed: {e}");
                AppError::internal("Failed to hash password")
            })?;
            let updated = db::users::set_password_hash(&state.pool, id, &hash)
                .await?
                .ok_or_else(|| AppError::not_found("User not found"))?;
            db::audit::append(
                &state.pool,
                Some(user.id),
                AuditAction::UserResetPassword,
                AuditEntity::User,
                Some(id.to_string()),
                None,
            )
            .await;
            updated
        }
        None => updated,
    };

    Ok(Json(updated))
}

/// DELETE deactivates; rows stay for the audit trail
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ServiceError> {
    require_admin(&user)?;
    if user.id == id {
        return Err(AppError::unprocessable("Cannot deactivate your own account").into());
    }
    let deactivated = db::users::deactivate(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::UserDeactivated,
        AuditEntity::User,
        Some(id.to_string()),
        Some(json!({ "via": "delete" })),
    )
    .await;

    Ok(Json(deactivated))
}

fn normalize_home(home: Option<String>) -> Result<Option<String>, AppError> {
    match home {
        Some(code) => {
            let code = code.trim().to_uppercase();
            if code.is_empty() {
                return Ok(None);
            }
            validate_storage_code(&code, "homeStorageCode")?;
            Ok(Some(code))
        }
        None => Ok(None),
    }
}

/// Distinguishes an absent field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(de).map(Some)
    }
}
