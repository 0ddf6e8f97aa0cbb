//! In-memory store (records are lost on restart)

use async_trait::async_trait;
use chrono::Utc;
use runlog_core::{
    validate_new_statistic, NewRunningStatistic, Result, RunningStatistic, StatisticId,
    StatisticStore, StoreError,
};
use tokio::sync::Mutex;

/// Ordered record list behind a single exclusive lock.
///
/// Reads and writes take the same lock; nothing is serialized while it is
/// held, callers get owned copies.
pub struct MemoryStatisticStore {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    records: Vec<RunningStatistic>,
    next_id: StatisticId,
}

impl MemoryStatisticStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Append a fully formed record as-is (no validation, no id assignment).
    ///
    /// Later `create` calls still hand out ids above any appended id.
    pub async fn append(&self, record: RunningStatistic) {
        let mut state = self.state.lock().await;
        if record.id >= state.next_id {
            state.next_id = record.id.saturating_add(1);
        }
        state.records.push(record);
    }

    /// Copy of the full sequence
    pub async fn snapshot(&self) -> Vec<RunningStatistic> {
        self.state.lock().await.records.clone()
    }
}

impl Default for MemoryStatisticStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatisticStore for MemoryStatisticStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<RunningStatistic>> {
        Ok(self.snapshot().await)
    }

    async fn create(&self, new: NewRunningStatistic) -> Result<RunningStatistic> {
        validate_new_statistic(&new)?;

        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::unavailable("identifier space exhausted"))?;

        // Stamped under the lock so created_at follows id order
        let record = RunningStatistic::from_new(id, new, Utc::now());
        state.records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: StatisticId) -> Result<RunningStatistic> {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: StatisticId) -> Result<()> {
        let mut state = self.state.lock().await;
        let index = state
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        state.records.remove(index);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.lock().await.records.len())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn sample() -> NewRunningStatistic {
        NewRunningStatistic::new("2024-01-01", "5km", "00:25:00")
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStatisticStore::new();

        let created = store.create(sample()).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_not_stored() {
        let store = MemoryStatisticStore::new();

        let err = store
            .create(NewRunningStatistic::new("2024-01-01", "", "00:25:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "distance", .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStatisticStore::new();
        let created = store.create(sample()).await.unwrap();

        assert_ok!(store.delete(created.id).await);
        assert_eq!(store.get(created.id).await, Err(StoreError::NotFound(created.id)));
        assert_err!(store.delete(created.id).await);
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_store_unchanged() {
        let store = MemoryStatisticStore::new();
        store.create(sample()).await.unwrap();

        assert_eq!(store.delete(999_999).await, Err(StoreError::NotFound(999_999)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryStatisticStore::new();
        let first = store.create(sample()).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(sample()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_skips_validation() {
        let store = MemoryStatisticStore::new();
        let mut record = store.create(sample()).await.unwrap();

        record.id = 10;
        record.distance.clear();
        store.append(record.clone()).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1], record);

        // ids handed out after an append stay unique
        let next = store.create(sample()).await.unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemoryStatisticStore::new());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(sample()).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);

        let listed = store.list().await.unwrap();
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }
}
