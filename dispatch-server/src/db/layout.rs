//! Layout persistence
//!
//! The grid is stored normalized (one row per occupied cell) and
//! rebuilt into the wire shape on load. A single layout named
//! `default` backs the current editor; the schema already allows more.

use shared::models::{GridCell, LayoutGrid, GRID_SIZE};
use sqlx::PgPool;

const DEFAULT_LAYOUT: &str = "default";

#[derive(sqlx::FromRow)]
struct CellRow {
    grid_row: i32,
    grid_col: i32,
    active: bool,
    storage_code: Option<String>,
    label: Option<String>,
}

/// Load the stored grid, or an empty one when nothing was saved yet
pub async fn load(pool: &PgPool) -> Result<LayoutGrid, sqlx::Error> {
    let layout_id: Option<i64> =
        sqlx::query_scalar("SELECT id FROM layouts WHERE name = $1")
            .bind(DEFAULT_LAYOUT)
            .fetch_optional(pool)
            .await?;

    let Some(layout_id) = layout_id else {
        return Ok(LayoutGrid::empty());
    };

    let cells = sqlx::query_as::<_, CellRow>(
        "SELECT grid_row, grid_col, active, storage_code, label \
         FROM layout_cells WHERE layout_id = $1",
    )
    .bind(layout_id)
    .fetch_all(pool)
    .await?;

    let mut grid = LayoutGrid::empty();
    for cell in cells {
        let (row, col) = (cell.grid_row as usize, cell.grid_col as usize);
        if row >= GRID_SIZE || col >= GRID_SIZE {
            continue;
        }
        grid.grid[row][col] = GridCell {
            active: cell.active,
            storage_code: cell.storage_code,
            label: cell.label,
        };
    }
    Ok(grid)
}

/// Replace the stored grid wholesale
pub async fn save(pool: &PgPool, grid: &LayoutGrid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Cascade drops the old cells with the layout row.
    sqlx::query("DELETE FROM layouts WHERE name = $1")
        .bind(DEFAULT_LAYOUT)
        .execute(&mut *tx)
        .await?;

    let layout_id: i64 =
        sqlx::query_scalar("INSERT INTO layouts (name) VALUES ($1) RETURNING id")
            .bind(DEFAULT_LAYOUT)
            .fetch_one(&mut *tx)
            .await?;

    for (row, cells) in grid.grid.iter().enumerate().take(GRID_SIZE) {
        for (col, cell) in cells.iter().enumerate().take(GRID_SIZE) {
            if !cell.active && cell.storage_code.is_none() && cell.label.is_none() {
                continue;
            }
            sqlx::query(
                r#"
                INSERT INTO layout_cells (layout_id, grid_row, grid_col, active, storage_code, label)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(layout_id)
            .bind(row as i32)
            .bind(col as i32)
            .bind(cell.active)
            .bind(cell.storage_code.as_deref())
            .bind(cell.label.as_deref())
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await
}
