//! Route model — a directed permission to move orders between storages

use serde::{Deserialize, Serialize};

/// Directed edge between two storage codes
///
/// At most one route exists per ordered (from, to) pair; a disabled route
/// (`active = false`) rejects new orders without being deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Route {
    pub id: i64,
    pub from_code: String,
    pub to_code: String,
    pub active: bool,
}
