//! Shared types and the analytics engine for the Agricultural Decision Support System
//!
//! This crate holds the domain models, the default crop and zone catalog,
//! configuration validation and the pure analytics pipeline that turns raw
//! weather observations into daily aggregates, risk flags, growing-degree-day
//! projections and ranked crop recommendations.

pub mod analytics;
pub mod catalog;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
