//! Route repository
//!
//! A route whitelists a `(from, to)` pair for order creation.

use shared::models::Route;
use sqlx::PgPool;

/// List routes, optionally only those starting at one storage
pub async fn list(pool: &PgPool, from_code: Option<&str>) -> Result<Vec<Route>, sqlx::Error> {
    match from_code {
        Some(from_code) => {
            sqlx::query_as::<_, Route>(
                "SELECT * FROM routes WHERE from_code = $1 ORDER BY to_code ASC",
            )
            .bind(from_code)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Route>(
                "SELECT * FROM routes ORDER BY from_code ASC, to_code ASC",
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// Active-route lookup used by order creation
pub async fn find_active(
    pool: &PgPool,
    from_code: &str,
    to_code: &str,
) -> Result<Option<Route>, sqlx::Error> {
    sqlx::query_as::<_, Route>(
        "SELECT * FROM routes WHERE from_code = $1 AND to_code = $2 AND active = TRUE",
    )
    .bind(from_code)
    .bind(to_code)
    .fetch_optional(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    from_code: &str,
    to_code: &str,
) -> Result<Route, sqlx::Error> {
    sqlx::query_as::<_, Route>(
        r#"
        INSERT INTO routes (from_code, to_code)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(from_code)
    .bind(to_code)
    .fetch_one(pool)
    .await
}

/// Bulk insert, skipping pairs that already exist
pub async fn insert_many(
    pool: &PgPool,
    pairs: &[(String, String)],
) -> Result<Vec<Route>, sqlx::Error> {
    let mut created = Vec::with_capacity(pairs.len());
    let mut tx = pool.begin().await?;
    for (from_code, to_code) in pairs {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (from_code, to_code)
            VALUES ($1, $2)
            ON CONFLICT (from_code, to_code) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(from_code)
        .bind(to_code)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some(route) = route {
            created.push(route);
        }
    }
    tx.commit().await?;
    Ok(created)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM routes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
