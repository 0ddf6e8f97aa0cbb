//! Storage trait for running statistics

use crate::{NewRunningStatistic, Result, RunningStatistic, StatisticId};
use async_trait::async_trait;

/// Persistence boundary for running statistics.
///
/// Implementations own the authoritative record set, assign identifiers and
/// creation timestamps, and never reuse an identifier.
#[async_trait]
pub trait StatisticStore: Send + Sync {
    /// Short backend name used in logs and health responses
    fn backend(&self) -> &'static str;

    /// All records, ordered by identifier
    async fn list(&self) -> Result<Vec<RunningStatistic>>;

    /// Store a validated payload and return the populated record
    async fn create(&self, new: NewRunningStatistic) -> Result<RunningStatistic>;

    async fn get(&self, id: StatisticId) -> Result<RunningStatistic>;

    async fn delete(&self, id: StatisticId) -> Result<()>;

    async fn count(&self) -> Result<usize>;

    /// Round trip to the backing store
    async fn ping(&self) -> Result<()>;

    /// Release backend resources at shutdown
    async fn close(&self) {}
}
