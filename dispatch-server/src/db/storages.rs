//! Storage node repository

use shared::models::{Storage, StorageKind};
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<Storage>, sqlx::Error> {
    sqlx::query_as::<_, Storage>("SELECT * FROM storages ORDER BY code ASC")
        .fetch_all(pool)
        .await
}

/// Which of the given codes exist, for bulk-input validation
pub async fn existing_codes(pool: &PgPool, codes: &[String]) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT code FROM storages WHERE code = ANY($1)")
        .bind(codes)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Storage>, sqlx::Error> {
    sqlx::query_as::<_, Storage>("SELECT * FROM storages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    code: &str,
    name: &str,
    kind: StorageKind,
) -> Result<Storage, sqlx::Error> {
    sqlx::query_as::<_, Storage>(
        r#"
        INSERT INTO storages (code, name, type)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(code)
    .bind(name)
    .bind(kind)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    name: &str,
    kind: StorageKind,
    active: bool,
) -> Result<Option<Storage>, sqlx::Error> {
    sqlx::query_as::<_, Storage>(
        r#"
        UPDATE storages
        SET name = $2, type = $3, active = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(kind)
    .bind(active)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM storages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
