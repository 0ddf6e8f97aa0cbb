//! Error types for running statistic storage

use crate::StatisticId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Malformed creation payload
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Running Statistic not found: {0}")]
    NotFound(StatisticId),

    /// Connection could not be acquired or the query failed
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn unavailable(e: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(e.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
