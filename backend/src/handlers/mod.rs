//! HTTP handlers for the Agricultural Advisory Server

pub mod crops;
pub mod health;
pub mod zones;

pub use crops::*;
pub use health::*;
pub use zones::*;
