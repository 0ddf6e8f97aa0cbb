//! HTTP handlers

pub mod error;
pub mod health;
pub mod statistics;

pub use health::{health, ping};
