//! Order endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::models::{Order, OrderStatus};
use shared::AppError;

use crate::auth::AuthUser;
use crate::db;
use crate::error::ServiceError;
use crate::orders::metrics::OriginMetrics;
use crate::orders::{lifecycle, metrics, policy};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatusQuery {
    status: Option<OrderStatus>,
}

/// GET /orders?status= — the queue, oldest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Order>>, ServiceError> {
    if !policy::can_list(user.role) {
        return Err(AppError::forbidden("Role may not list orders").into());
    }
    let status = query.status.unwrap_or(OrderStatus::New);
    let orders = db::orders::list_by_status(&state.pool, status).await?;
    Ok(Json(orders))
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<lifecycle::CreateOrder>,
) -> Result<(StatusCode, Json<Order>), ServiceError> {
    let order = lifecycle::create(&state, &user, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/metrics?status= — per-origin rollup
pub async fn metrics(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<OriginMetrics>>, ServiceError> {
    if !policy::can_view_metrics(user.role) {
        return Err(AppError::forbidden("Role may not view metrics").into());
    }
    let status = query.status.unwrap_or(OrderStatus::New);
    let rows = metrics::by_origin(&state.pool, status).await?;
    Ok(Json(rows))
}

/// POST /orders/{id}/take
pub async fn take(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::take(&state, &user, id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/done
pub async fn done(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::complete(&state, &user, id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/cancel — body `{ "reason": ... }` is optional
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    body: Option<Json<lifecycle::CancelOrder>>,
) -> Result<Json<Order>, ServiceError> {
    let reason = body.and_then(|Json(body)| body.reason);
    let order = lifecycle::cancel(&state, &user, id, reason).await?;
    Ok(Json(order))
}
