//! Core types for RiskQuant: errors, configuration, and tracing.
//!
//! Every model crate depends on this one. Nothing here samples.

pub mod config;
pub mod errors;
pub mod tracing;
