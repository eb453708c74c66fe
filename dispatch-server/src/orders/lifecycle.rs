//! Lifecycle transitions
//!
//! Each mutation is one conditional write in `db::orders`; this module
//! adds role policy, validation, the audit trail and event publishing.
//! When the conditional write returns no row, the order is re-read once
//! to tell "gone" apart from "lost the race" for the error response.

use serde::Deserialize;
use serde_json::json;
use shared::models::{Order, Role, Urgency};
use shared::{AppError, Event};

use crate::auth::AuthUser;
use crate::db;
use crate::db::audit::{AuditAction, AuditEntity};
use crate::error::ServiceResult;
use crate::orders::{metrics, policy};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub from: String,
    pub to: String,
    pub urgency: Option<Urgency>,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelOrder {
    pub reason: Option<String>,
}

/// Creating against a missing or disabled route is a client mistake,
/// reported as 400 with the route spelled out
fn invalid_route(from: &str, to: &str) -> AppError {
    AppError::bad_request(format!("Invalid route {from} -> {to}"))
}

/// Create an order on an active route
///
/// Urgency falls back to the route's priority rule, then to STANDARD.
pub async fn create(state: &AppState, user: &AuthUser, req: CreateOrder) -> ServiceResult<Order> {
    if !policy::can_create(user.role) {
        return Err(AppError::forbidden("Role may not create orders").into());
    }

    let from = req.from.trim().to_uppercase();
    let to = req.to.trim().to_uppercase();
    crate::util::validate_storage_code(&from, "from")?;
    crate::util::validate_storage_code(&to, "to")?;
    if from == to {
        return Err(AppError::unprocessable("Origin and destination must differ").into());
    }
    let note = req.note.as_deref().map(str::trim).filter(|n| !n.is_empty());
    if note.is_some_and(|n| n.len() > 255) {
        return Err(AppError::bad_request("note must be at most 255 characters").into());
    }

    if db::routes::find_active(&state.pool, &from, &to).await?.is_none() {
        return Err(invalid_route(&from, &to).into());
    }

    let urgency = match req.urgency {
        Some(urgency) => urgency,
        None => db::priority_rules::find_enabled_for_route(&state.pool, &from, &to)
            .await?
            .map(|rule| rule.default_urgency)
            .unwrap_or(Urgency::Standard),
    };

    let order = db::orders::insert(&state.pool, &from, &to, urgency, note).await?;

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::OrderCreated,
        AuditEntity::Order,
        Some(order.id.to_string()),
        Some(json!({ "from": from, "to": to, "urgency": urgency })),
    )
    .await;

    state.bus.publish(Event::OrderCreated(order.clone()));
    publish_metrics(state).await;
    Ok(order)
}

/// Claim an order from the open queue
pub async fn take(state: &AppState, user: &AuthUser, id: i64) -> ServiceResult<Order> {
    if !policy::can_take(user.role) {
        return Err(AppError::forbidden("Role may not take orders").into());
    }

    let Some(order) = db::orders::take(&state.pool, id, user.id).await? else {
        return match db::orders::find_by_id(&state.pool, id).await? {
            None => Err(AppError::not_found("Order not found").into()),
            Some(_) => Err(AppError::conflict("Order already taken").into()),
        };
    };

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::OrderTaken,
        AuditEntity::Order,
        Some(order.id.to_string()),
        None,
    )
    .await;

    state.bus.publish(Event::OrderStatusChanged(order.clone()));
    publish_metrics(state).await;
    Ok(order)
}

/// Complete an order the caller has claimed
pub async fn complete(state: &AppState, user: &AuthUser, id: i64) -> ServiceResult<Order> {
    if !policy::can_complete(user.role) {
        return Err(AppError::forbidden("Role may not complete orders").into());
    }

    // one Conflict for wrong status and wrong assignee alike, so a
    // non-owner cannot probe who holds an order
    let Some(order) = db::orders::complete(&state.pool, id, user.id).await? else {
        return match db::orders::find_by_id(&state.pool, id).await? {
            None => Err(AppError::not_found("Order not found").into()),
            Some(_) => Err(AppError::conflict("Order not in progress").into()),
        };
    };

    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::OrderDone,
        AuditEntity::Order,
        Some(order.id.to_string()),
        None,
    )
    .await;

    state.bus.publish(Event::OrderStatusChanged(order.clone()));
    publish_metrics(state).await;
    Ok(order)
}

/// Cancel an order, within what the caller's role allows
pub async fn cancel(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    reason: Option<String>,
) -> ServiceResult<Order> {
    let allowed = policy::cancelable_from(user.role);

    // failure diagnosis: workers were outside their policy (Forbidden);
    // admin/operator may cancel any non-terminal state, so their
    // failure means the order already finished (Conflict)
    let Some(order) = db::orders::cancel(&state.pool, id, allowed).await? else {
        return match db::orders::find_by_id(&state.pool, id).await? {
            None => Err(AppError::not_found("Order not found").into()),
            Some(_) if user.role == Role::Worker => {
                Err(AppError::forbidden("Workers may cancel only new orders").into())
            }
            Some(_) => Err(AppError::conflict("Order already finished").into()),
        };
    };

    let reason = reason
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty());
    db::audit::append(
        &state.pool,
        Some(user.id),
        AuditAction::OrderCanceled,
        AuditEntity::Order,
        Some(order.id.to_string()),
        reason.map(|reason| json!({ "reason": reason })),
    )
    .await;

    state.bus.publish(Event::OrderStatusChanged(order.clone()));
    publish_metrics(state).await;
    Ok(order)
}

/// Recompute and broadcast the queue rollup
async fn publish_metrics(state: &AppState) {
    match metrics::by_origin(&state.pool, shared::models::OrderStatus::New).await {
        Ok(rows) => {
            let payload = serde_json::to_value(rows).unwrap_or_default();
            state.bus.publish(Event::MetricsUpdated(payload));
        }
        Err(err) => tracing::error!("metrics recompute failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn missing_route_is_bad_request() {
        let err = invalid_route("A01", "Z99");
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(err.message.contains("A01") && err.message.contains("Z99"));
    }

    #[test]
    fn cancel_reason_is_optional() {
        let body: CancelOrder = serde_json::from_str("{}").unwrap();
        assert!(body.reason.is_none());

        let body: CancelOrder = serde_json::from_str(r#"{"reason":"mis-pick"}"#).unwrap();
        assert_eq!(body.reason.as_deref(), Some("mis-pick"));
    }
}
