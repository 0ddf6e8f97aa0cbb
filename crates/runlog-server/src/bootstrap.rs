//! Startup: open storage, wait for it, prepare the schema

use crate::config::{ServerConfig, StorageBackend};
use crate::storage::{MemoryStatisticStore, PgStatisticStore};
use anyhow::{bail, Context, Result};
use runlog_core::StatisticStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Open the configured store and bring it to a servable state.
///
/// For PostgreSQL this retries connectivity for the configured budget and
/// then creates the table. Any failure here is fatal for the process.
pub async fn open_store(config: &ServerConfig) -> Result<Arc<dyn StatisticStore>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage, records are lost on restart");
            Ok(Arc::new(MemoryStatisticStore::new()))
        }
        StorageBackend::Postgres => {
            let db = &config.database;
            let store = PgStatisticStore::connect_lazy(db)?;

            wait_for_storage(&store, db.connect_attempts, db.connect_retry_delay())
                .await
                .context("Database never became reachable")?;

            store
                .prepare_schema(db.reset_schema)
                .await
                .context("Failed to prepare database schema")?;

            Ok(Arc::new(store))
        }
    }
}

/// Ping `store` up to `attempts` times, `delay` apart.
///
/// Returns the 1-based attempt that succeeded.
pub async fn wait_for_storage(
    store: &dyn StatisticStore,
    attempts: u32,
    delay: Duration,
) -> Result<u32> {
    let mut last_error = None;

    for attempt in 1..=attempts {
        match store.ping().await {
            Ok(()) => {
                info!(
                    "{} storage reachable (attempt {}/{})",
                    store.backend(),
                    attempt,
                    attempts
                );
                return Ok(attempt);
            }
            Err(e) => {
                warn!(
                    "{} storage not reachable (attempt {}/{}): {}",
                    store.backend(),
                    attempt,
                    attempts,
                    e
                );
                last_error = Some(e);
            }
        }

        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }

    match last_error {
        Some(e) => Err(e).with_context(|| format!("Gave up after {} attempts", attempts)),
        None => bail!("No connection attempts configured"),
    }
}
