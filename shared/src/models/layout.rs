//! Layout grid wire types
//!
//! The editor itself is client-side; the server only stores and serves
//! the 12×12 cell grid.

use serde::{Deserialize, Serialize};

/// Fixed grid dimension (rows and columns)
pub const GRID_SIZE: usize = 12;

/// One cell of the layout grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The full layout as served to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutGrid {
    /// Visual layer data (reserved, currently always empty)
    pub layers: Vec<serde_json::Value>,
    /// 12×12 cell grid, row-major
    pub grid: Vec<Vec<GridCell>>,
}

impl LayoutGrid {
    /// An all-inactive grid
    pub fn empty() -> Self {
        Self {
            layers: Vec::new(),
            grid: vec![vec![GridCell::default(); GRID_SIZE]; GRID_SIZE],
        }
    }
}
