//! Order lifecycle engine
//!
//! `policy` decides who may do what, `lifecycle` performs the
//! transitions against the store and publishes events, `metrics`
//! aggregates the dashboard rollup.

pub mod lifecycle;
pub mod metrics;
pub mod policy;
