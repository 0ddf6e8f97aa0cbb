//! Runlog Types - Pure type definitions
//!
//! This crate contains only pure data types with no async runtime dependencies,
//! so it can be shared by the server and by any client of the HTTP API.

pub mod statistic;

pub use statistic::*;
