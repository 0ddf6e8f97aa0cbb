//! Validation of creation payloads

use crate::error::{Result, StoreError};
use crate::NewRunningStatistic;

/// Column width of `date`, `distance` and `time` in the relational schema
pub const MAX_FIELD_LEN: usize = 10;

/// Reject payloads with a missing, blank or over-long field.
///
/// Runs before any storage interaction so that a rejected request never
/// touches the store.
pub fn validate_new_statistic(new: &NewRunningStatistic) -> Result<()> {
    for (field, value) in new.fields() {
        if value.trim().is_empty() {
            return Err(StoreError::validation(field, "is required"));
        }
        let len = value.chars().count();
        if len > MAX_FIELD_LEN {
            return Err(StoreError::validation(
                field,
                format!("must be at most {} characters, got {}", MAX_FIELD_LEN, len),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_complete_payload() {
        let new = NewRunningStatistic::new("2024-01-01", "5km", "00:25:00");
        assert!(validate_new_statistic(&new).is_ok());
    }

    #[test]
    fn test_reports_first_missing_field() {
        let new = NewRunningStatistic::new("2024-01-01", "", "");
        assert_eq!(
            validate_new_statistic(&new),
            Err(StoreError::validation("distance", "is required"))
        );
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let new = NewRunningStatistic::new("  ", "5km", "00:25:00");
        let err = validate_new_statistic(&new).unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "date", .. }));
    }

    #[test]
    fn test_rejects_over_long_field() {
        let new = NewRunningStatistic::new("2024-01-01", "5km", "00:25:00.123");
        let err = validate_new_statistic(&new).unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "time", .. }));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Ten two-byte characters still fit the column
        let new = NewRunningStatistic::new("éééééééééé", "5km", "00:25:00");
        assert!(validate_new_statistic(&new).is_ok());
    }
}
