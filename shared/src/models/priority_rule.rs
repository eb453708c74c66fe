//! Priority rule model — default-urgency override per route

use serde::{Deserialize, Serialize};

use super::order::Urgency;

/// Default-urgency override keyed by (scope, from, to)
///
/// `scope` is currently always `route`; the enum keeps the column closed
/// for future scopes without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "priority_scope", rename_all = "lowercase")
)]
pub enum PriorityScope {
    Route,
}

/// Priority rule entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PriorityRule {
    pub id: i64,
    pub scope: PriorityScope,
    pub from_code: String,
    pub to_code: String,
    pub default_urgency: Urgency,
    pub enabled: bool,
}
