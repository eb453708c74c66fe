//! Priority rule repository
//!
//! Rules supply the default urgency when an order is created without
//! one. Scope is per route for now; the enum leaves room for wider
//! scopes later.

use shared::models::{PriorityRule, PriorityScope, Urgency};
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<PriorityRule>, sqlx::Error> {
    sqlx::query_as::<_, PriorityRule>(
        "SELECT * FROM priority_rules ORDER BY from_code ASC, to_code ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<PriorityRule>, sqlx::Error> {
    sqlx::query_as::<_, PriorityRule>("SELECT * FROM priority_rules WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Enabled rule matching the route of a new order, if any
pub async fn find_enabled_for_route(
    pool: &PgPool,
    from_code: &str,
    to_code: &str,
) -> Result<Option<PriorityRule>, sqlx::Error> {
    sqlx::query_as::<_, PriorityRule>(
        r#"
        SELECT * FROM priority_rules
        WHERE scope = 'route' AND from_code = $1 AND to_code = $2 AND enabled = TRUE
        "#,
    )
    .bind(from_code)
    .bind(to_code)
    .fetch_optional(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    scope: PriorityScope,
    from_code: &str,
    to_code: &str,
    default_urgency: Urgency,
    enabled: bool,
) -> Result<PriorityRule, sqlx::Error> {
    sqlx::query_as::<_, PriorityRule>(
        r#"
        INSERT INTO priority_rules (scope, from_code, to_code, default_urgency, enabled)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(scope)
    .bind(from_code)
    .bind(to_code)
    .bind(default_urgency)
    .bind(enabled)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    default_urgency: Urgency,
    enabled: bool,
) -> Result<Option<PriorityRule>, sqlx::Error> {
    sqlx::query_as::<_, PriorityRule>(
        r#"
        UPDATE priority_rules
        SET default_urgency = $2, enabled = $3
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(default_urgency)
    .bind(enabled)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM priority_rules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
