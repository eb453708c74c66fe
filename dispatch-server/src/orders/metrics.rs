//! Queue metrics, grouped by origin storage
//!
//! One aggregate query over the open queue; recomputed on demand and
//! after every lifecycle transition rather than kept incrementally.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::OrderStatus;
use sqlx::PgPool;

/// Rollup for one origin storage with open orders
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OriginMetrics {
    /// Origin storage code
    #[serde(rename = "from")]
    pub from_code: String,
    /// Open (`new`) orders originating here
    pub count: i64,
    /// True when any open order is urgent
    pub has_urgent: bool,
    pub oldest_created_at: DateTime<Utc>,
    /// Age of the oldest open order, in minutes
    pub age_minutes: f64,
}

/// Aggregate the queue per origin for one status (usually `new`)
pub async fn by_origin(
    pool: &PgPool,
    status: OrderStatus,
) -> Result<Vec<OriginMetrics>, sqlx::Error> {
    sqlx::query_as::<_, OriginMetrics>(
        r#"
        SELECT
            from_code,
            COUNT(*) AS count,
            BOOL_OR(urgency = 'URGENT') AS has_urgent,
            MIN(created_at) AS oldest_created_at,
            (EXTRACT(EPOCH FROM (NOW() - MIN(created_at))) / 60.0)::float8 AS age_minutes
        FROM orders
        WHERE status = $1
        GROUP BY from_code
        ORDER BY from_code ASC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
}
