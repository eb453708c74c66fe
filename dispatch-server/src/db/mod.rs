//! Database layer
//!
//! PostgreSQL via sqlx. One module per aggregate, free functions over
//! `&PgPool`. Embedded migrations run on startup.

pub mod audit;
pub mod layout;
pub mod orders;
pub mod priority_rules;
pub mod routes;
pub mod storages;
pub mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to PostgreSQL and apply pending migrations
pub async fn connect(database_url: &str) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    tracing::info!("Database connection established");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Whether a sqlx error is a Postgres unique-constraint violation (23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_pg_code(err, "23505")
}

/// Whether a sqlx error is a Postgres foreign-key violation (23503)
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_pg_code(err, "23503")
}

fn has_pg_code(err: &sqlx::Error, code: &str) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|c| c == code)
}
