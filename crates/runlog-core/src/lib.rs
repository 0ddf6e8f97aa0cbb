//! Runlog Core Library
//!
//! Error taxonomy, validation rules and the storage port shared by every
//! running statistics backend.

// Re-export pure types from runlog-types
pub use runlog_types::*;

pub mod error;
pub mod ports;
pub mod validation;

pub use error::{Result, StoreError};
pub use ports::StatisticStore;
pub use validation::{validate_new_statistic, MAX_FIELD_LEN};
