//! Domain models
//!
//! Wire representations use camelCase (the field names existing clients
//! already bind to); database columns stay snake_case via `sqlx::FromRow`
//! under the `db` feature.

pub mod layout;
pub mod order;
pub mod priority_rule;
pub mod route;
pub mod storage;
pub mod user;

pub use layout::{GridCell, LayoutGrid, GRID_SIZE};
pub use order::{Order, OrderStatus, Urgency};
pub use priority_rule::{PriorityRule, PriorityScope};
pub use route::Route;
pub use storage::{Storage, StorageKind};
pub use user::{Role, User};
