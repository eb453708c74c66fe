//! Route management endpoints (admin)

use std::collections::BTreeSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use shared::models::Route;
use shared::AppError;

use crate::auth::middleware::require_admin;
use crate::auth::AuthUser;
use crate::db;
use crate::db::audit::{AuditAction, AuditEntity};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::validate_storage_code;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    from_code: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Route>>, ServiceError> {
    require_admin(&user)?;
    let routes = db::routes::list(&state.pool, query.from_code.as_deref()).await?;
    Ok(Json(routes))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePair {
    pub from_code: String,
    pub to_code: String,
}

impl RoutePair {
    fn normalized(&self) -> Result<(String, String), AppError> {
        let from = self.from_code.trim().to_uppercase();
        let to = self.to_code.trim().to_uppercase();
        validate_storage_code(&from, "fromCode")?;
        validate_storage_code(&to, "toCode")?;
        Ok((from, to))
    }
}

/// Both endpoints must exist; 422 tells the caller which are missing
async fn check_codes_exist(state: &AppState, codes: &BTreeSet<String>) -> Result<(), ServiceError> {
    let codes: Vec<String> = codes.iter().cloned().collect();
    let existing = db::storages::existing_codes(&state.pool, &codes).await?;
    let missing: Vec<&String> = codes.iter().filter(|c| !existing.contains(c)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::unprocessable("Unknown storage codes")
            .with_details(json!({ "missing": missing }))
            .into())
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<RoutePair>,
) -> Result<(StatusCode, Json<Route>), ServiceError> {
    require_admin(&user)?;
    let (from, to) = req.normalized()?;
    if from == to {
        return Err(AppError::unprocessable("Route endpoints must differ").into());
    }
    check_codes_exist(&state, &BTreeSet::from([from.clone(), to.clone()])).await?;

    match db::routes::insert(&state.pool, &from, &to).await {
        Ok(route) => Ok((StatusCode::CREATED, Json(route))),
        Err(err) if db::is_unique_violation(&err) => {
            Err(AppError::conflict(format!("Route {from} -> {to} already exists")).into())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /routes/bulk
///
/// Self-routes are skipped, existing pairs are left untouched; the
/// response lists only the routes actually created.
pub async fn bulk_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<Vec<RoutePair>>,
) -> Result<(StatusCode, Json<Vec<Route>>), ServiceError> {
    require_admin(&user)?;

    let mut codes = BTreeSet::new();
    let mut pairs = Vec::with_capacity(req.len());
    for pair in &req {
        let (from, to) = pair.normalized()?;
        if from == to {
            continue;
        }
        codes.insert(from.clone());
        codes.insert(to.clone());
        pairs.push((from, to));
    }
    if !codes.is_empty() {
        check_codes_exist(&state, &codes).await?;
    }

    let created = db::routes::insert_many(&state.pool, &pairs).await?;

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::RoutesBulkUpdate,
        AuditEntity::Route,
        None,
        Some(json!({ "requested": req.len(), "created": created.len() })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&user)?;
    if db::routes::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Route not found").into())
    }
}
