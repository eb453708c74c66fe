//! Shared types for the dispatch system
//!
//! Wire-level types used by the server and its clients: domain models,
//! the unified error system and the live-stream event types.

pub mod error;
pub mod event;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use event::{Event, PING_EVENT};
