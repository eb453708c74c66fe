//! Storage management endpoints (admin)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::models::{Storage, StorageKind};
use shared::AppError;

use crate::auth::middleware::require_admin;
use crate::auth::AuthUser;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::validate_storage_code;

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Storage>>, ServiceError> {
    require_admin(&user)?;
    Ok(Json(db::storages::list(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct CreateStorage {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StorageKind,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateStorage>,
) -> Result<(StatusCode, Json<Storage>), ServiceError> {
    require_admin(&user)?;
    let code = req.code.trim().to_uppercase();
    validate_storage_code(&code, "code")?;
    let name = req.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::bad_request("name must be 1-100 characters").into());
    }

    match db::storages::insert(&state.pool, &code, name, req.kind).await {
        Ok(storage) => Ok((StatusCode::CREATED, Json(storage))),
        Err(err) if db::is_unique_violation(&err) => {
            Err(AppError::conflict(format!("Storage {code} already exists")).into())
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
pub struct PatchStorage {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<StorageKind>,
    pub active: Option<bool>,
}

pub async fn patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<PatchStorage>,
) -> Result<Json<Storage>, ServiceError> {
    require_admin(&user)?;
    let Some(existing) = db::storages::find_by_id(&state.pool, id).await? else {
        return Err(AppError::not_found("Storage not found").into());
    };

    let name = req.name.unwrap_or(existing.name);
    let name = name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::bad_request("name must be 1-100 characters").into());
    }
    let kind = req.kind.unwrap_or(existing.kind);
    let active = req.active.unwrap_or(existing.active);

    let updated = db::storages::update(&state.pool, id, name, kind, active)
        .await?
        .ok_or_else(|| AppError::not_found("Storage not found"))?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&user)?;
    match db::storages::delete(&state.pool, id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(AppError::not_found("Storage not found").into()),
        Err(err) if db::is_foreign_key_violation(&err) => Err(AppError::conflict(
            "Storage is referenced by routes, rules or orders",
        )
        .into()),
        Err(err) => Err(err.into()),
    }
}
