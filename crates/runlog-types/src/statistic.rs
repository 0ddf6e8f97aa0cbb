//! Running statistic types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored running statistic (PostgreSQL `SERIAL`)
pub type StatisticId = i32;

/// One logged run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStatistic {
    pub id: StatisticId,
    pub date: String,
    pub distance: String,
    pub time: String,
    /// Assigned by the store when the record is created
    pub created_at: DateTime<Utc>,
}

impl RunningStatistic {
    /// Build a stored record from a creation payload
    pub fn from_new(id: StatisticId, new: NewRunningStatistic, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date: new.date,
            distance: new.distance,
            time: new.time,
            created_at,
        }
    }
}

/// Creation payload for `POST /running-statistics`
///
/// Missing fields decode as empty strings so that they are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRunningStatistic {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub time: String,
}

impl NewRunningStatistic {
    pub fn new(
        date: impl Into<String>,
        distance: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            distance: distance.into(),
            time: time.into(),
        }
    }

    /// Field values paired with their wire names, in declaration order
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("date", self.date.as_str()),
            ("distance", self.distance.as_str()),
            ("time", self.time.as_str()),
        ]
    }
}

/// Response body of `GET /running-statistics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: Vec<RunningStatistic>,
}

impl From<Vec<RunningStatistic>> for StatisticsResponse {
    fn from(statistics: Vec<RunningStatistic>) -> Self {
        Self { statistics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serializes_snake_case() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap();
        let record = RunningStatistic::from_new(
            7,
            NewRunningStatistic::new("2024-01-01", "5km", "00:25:00"),
            created_at,
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["distance"], "5km");
        assert_eq!(value["time"], "00:25:00");
        assert_eq!(value["created_at"], "2024-01-01T07:30:00Z");
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let new: NewRunningStatistic = serde_json::from_str(r#"{"date":"2024-01-01"}"#).unwrap();
        assert_eq!(new.date, "2024-01-01");
        assert!(new.distance.is_empty());
        assert!(new.time.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let new: NewRunningStatistic = serde_json::from_str(
            r#"{"id":3,"date":"d","distance":"5km","time":"t","createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(new, NewRunningStatistic::new("d", "5km", "t"));
    }

    #[test]
    fn test_list_response_shape() {
        let body = serde_json::to_string(&StatisticsResponse::default()).unwrap();
        assert_eq!(body, r#"{"statistics":[]}"#);
    }
}
