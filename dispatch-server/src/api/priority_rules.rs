//! Priority rule endpoints (admin)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use shared::models::{PriorityRule, PriorityScope, Urgency};
use shared::AppError;

use crate::auth::middleware::require_admin;
use crate::auth::AuthUser;
use crate::db;
use crate::db::audit::{AuditAction, AuditEntity};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::validate_storage_code;

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PriorityRule>>, ServiceError> {
    require_admin(&user)?;
    Ok(Json(db::priority_rules::list(&state.pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRule {
    #[serde(default = "default_scope")]
    pub scope: PriorityScope,
    pub from_code: String,
    pub to_code: String,
    pub default_urgency: Urgency,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_scope() -> PriorityScope {
    PriorityScope::Route
}

fn default_enabled() -> bool {
    true
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateRule>,
) -> Result<(StatusCode, Json<PriorityRule>), ServiceError> {
    require_admin(&user)?;
    let from = req.from_code.trim().to_uppercase();
    let to = req.to_code.trim().to_uppercase();
    validate_storage_code(&from, "fromCode")?;
    validate_storage_code(&to, "toCode")?;

    let rule = match db::priority_rules::insert(
        &state.pool,
        req.scope,
        &from,
        &to,
        req.default_urgency,
        req.enabled,
    )
    .await
    {
        Ok(rule) => rule,
        Err(err) if db::is_unique_violation(&err) => {
            return Err(
                AppError::conflict(format!("Rule for {from} -> {to} already exists")).into(),
            );
        }
        Err(err) if db::is_foreign_key_violation(&err) => {
            return Err(AppError::unprocessable("Unknown storage codes").into());
        }
        Err(err) => return Err(err.into()),
    };

    audit_upsert(&state, user.id, &rule).await;
    Ok((StatusCode::CREATED, Json(rule)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRule {
    pub default_urgency: Option<Urgency>,
    pub enabled: Option<bool>,
}

pub async fn patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<PatchRule>,
) -> Result<Json<PriorityRule>, ServiceError> {
    require_admin(&user)?;
    let Some(existing) = db::priority_rules::find_by_id(&state.pool, id).await? else {
        return Err(AppError::not_found("Priority rule not found").into());
    };

    let default_urgency = req.default_urgency.unwrap_or(existing.default_urgency);
    let enabled = req.enabled.unwrap_or(existing.enabled);

    let rule = db::priority_rules::update(&state.pool, id, default_urgency, enabled)
        .await?
        .ok_or_else(|| AppError::not_found("Priority rule not found"))?;

    audit_upsert(&state, user.id, &rule).await;
    Ok(Json(rule))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&user)?;
    if db::priority_rules::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Priority rule not found").into())
    }
}

async fn audit_upsert(state: &AppState, actor_id: i64, rule: &PriorityRule) {
    db::audit::append(
        &state.pool,
        Some(actor_id),
        AuditAction::PriorityRuleUpsert,
        AuditEntity::PriorityRule,
        Some(rule.id.to_string()),
        Some(json!({
            "fromCode": rule.from_code,
            "toCode": rule.to_code,
            "defaultUrgency": rule.default_urgency,
            "enabled": rule.enabled,
        })),
    )
    .await;
}
