//! Layout endpoints
//!
//! The grid itself is opaque to the server apart from structural
//! validation; rendering is entirely client-side.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::{Extension, Json};
use serde_json::json;
use shared::models::{LayoutGrid, GRID_SIZE};
use shared::AppError;

use crate::auth::middleware::require_admin;
use crate::auth::AuthUser;
use crate::db;
use crate::db::audit::{AuditAction, AuditEntity};
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /layout
pub async fn get_layout(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<LayoutGrid>, ServiceError> {
    Ok(Json(db::layout::load(&state.pool).await?))
}

/// POST /layout — replace the stored grid
pub async fn save_layout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(grid): Json<LayoutGrid>,
) -> Result<Json<LayoutGrid>, ServiceError> {
    require_admin(&user)?;
    validate_grid(&state, &grid).await?;

    db::layout::save(&state.pool, &grid).await?;

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::LayoutSaved,
        AuditEntity::Layout,
        None,
        None,
    )
    .await;

    Ok(Json(grid))
}

async fn validate_grid(state: &AppState, grid: &LayoutGrid) -> Result<(), ServiceError> {
    if grid.grid.len() != GRID_SIZE || grid.grid.iter().any(|row| row.len() != GRID_SIZE) {
        return Err(
            AppError::bad_request(format!("grid must be {GRID_SIZE}x{GRID_SIZE}")).into(),
        );
    }

    let mut codes = BTreeSet::new();
    for (row_idx, row) in grid.grid.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            match &cell.storage_code {
                Some(code) => {
                    if !codes.insert(code.clone()) {
                        return Err(AppError::unprocessable(format!(
                            "Storage {code} appears in more than one cell"
                        ))
                        .into());
                    }
                }
                None if cell.active => {
                    return Err(AppError::unprocessable(format!(
                        "Active cell ({row_idx},{col_idx}) has no storage code"
                    ))
                    .into());
                }
                None => {}
            }
        }
    }

    if !codes.is_empty() {
        let codes: Vec<String> = codes.into_iter().collect();
        let existing = db::storages::existing_codes(&state.pool, &codes).await?;
        let missing: Vec<&String> = codes.iter().filter(|c| !existing.contains(c)).collect();
        if !missing.is_empty() {
            return Err(AppError::unprocessable("Unknown storage codes")
                .with_details(json!({ "missing": missing }))
                .into());
        }
    }

    Ok(())
}
