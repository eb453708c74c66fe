//! Unified error system
//!
//! Every failure the API surfaces is an [`AppError`]: a closed
//! [`ErrorCode`], a human-readable message and optional structured
//! details. Rendered over HTTP as the uniform envelope
//!
//! ```json
//! { "error": { "code": "CONFLICT", "message": "Order already taken" } }
//! ```
//!
//! with the HTTP status carried by the code's category.

mod codes;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
