//! In-process event fan-out and the SSE subscriber side.

pub mod bus;
pub mod channel;

pub use bus::EventBus;
