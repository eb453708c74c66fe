//! Storage model — a named warehouse location

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage location category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "storage_kind", rename_all = "UPPERCASE")
)]
pub enum StorageKind {
    Storage,
    Line,
    Buffer,
}

/// Storage location entity
///
/// `code` is the short unique identifier (1-5 uppercase alphanumerics)
/// routes and orders reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Storage {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub kind: StorageKind,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
