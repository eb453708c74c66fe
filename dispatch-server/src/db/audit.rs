//! Append-only audit trail
//!
//! Writes are best effort: a failed audit insert is logged and dropped
//! rather than failing the request that triggered it.

use serde_json::Value;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    UserActivated,
    UserDeactivated,
    UserResetPassword,
    OrderCreated,
    OrderTaken,
    OrderDone,
    OrderCanceled,
    RoutesBulkUpdate,
    PriorityRuleUpsert,
    LayoutSaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "audit_entity_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEntity {
    User,
    Order,
    Route,
    PriorityRule,
    Layout,
}

pub async fn append(
    pool: &PgPool,
    actor_id: Option<i64>,
    action: AuditAction,
    entity: AuditEntity,
    entity_id: Option<String>,
    meta: Option<Value>,
) {
    let result = sqlx::query(
        r#"
        INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, meta)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(actor_id)
    .bind(action)
    .bind(entity)
    .bind(entity_id)
    .bind(meta)
    .execute(pool)
    .await;

    if let Err(err) = result {
        tracing::error!("audit append failed: {err}");
    }
}
