//! Order store operations
//!
//! Take / Complete / Cancel are single conditional UPDATEs: the status
//! precondition lives in the WHERE clause, so the database is the
//! arbiter when concurrent requests race for the same order. Zero rows
//! affected means the caller lost — never a partial write. This also
//! holds across multiple server processes sharing the pool; in-process
//! locking would not.

use shared::models::{Order, OrderStatus, Urgency};
use sqlx::PgPool;

/// Queue listing, oldest first
pub async fn list_by_status(pool: &PgPool, status: OrderStatus) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE status = $1 ORDER BY created_at ASC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new order in state `new`
pub async fn insert(
    pool: &PgPool,
    from_code: &str,
    to_code: &str,
    urgency: Urgency,
    note: Option<&str>,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (from_code, to_code, urgency, note)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(from_code)
    .bind(to_code)
    .bind(urgency)
    .bind(note)
    .fetch_one(pool)
    .await
}

/// Claim an order: `new → in_progress`, at most one winner
///
/// Returns `None` when the order is not (or no longer) in state `new` —
/// the compare-and-set failed and the caller lost the race.
pub async fn take(pool: &PgPool, id: i64, assignee_id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status = 'in_progress', assignee_id = $2, taken_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = 'new'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(assignee_id)
    .fetch_optional(pool)
    .await
}

/// Complete an order: `in_progress → done`, owner only
///
/// The assignee check is part of the same conditional write; `None`
/// covers both "wrong status" and "wrong assignee".
pub async fn complete(
    pool: &PgPool,
    id: i64,
    assignee_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status = 'done', done_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = 'in_progress' AND assignee_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(assignee_id)
    .fetch_optional(pool)
    .await
}

/// Cancel an order, constrained to the statuses the caller may cancel from
pub async fn cancel(
    pool: &PgPool,
    id: i64,
    from_statuses: &[OrderStatus],
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status = 'canceled', canceled_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = ANY($2)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(from_statuses)
    .fetch_optional(pool)
    .await
}
