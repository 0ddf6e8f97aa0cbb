//! PostgreSQL store

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use runlog_core::{
    validate_new_statistic, NewRunningStatistic, RunningStatistic, StatisticId, StatisticStore,
    StoreError,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

pub struct PgStatisticStore {
    pool: PgPool,
}

impl PgStatisticStore {
    /// Build the pool without connecting; the bootstrap retry loop pings it.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let password = config
            .read_password()
            .context("Database password is required for the postgres backend")?;

        tracing::info!(
            "Configuring PostgreSQL pool: {}@{}:{}/{} (max {} connections)",
            config.user,
            config.host,
            config.port,
            config.name,
            config.max_connections
        );

        Ok(Self::with_options(
            config.connect_options(&password),
            config.max_connections,
        ))
    }

    pub fn with_options(options: PgConnectOptions, max_connections: u32) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(options);
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table if absent. With `reset`, drop it first.
    pub async fn prepare_schema(&self, reset: bool) -> Result<()> {
        if reset {
            tracing::warn!("reset_schema is enabled, dropping table running_statistics");
            sqlx::query("DROP TABLE IF EXISTS running_statistics")
                .execute(&self.pool)
                .await
                .context("Failed to drop running_statistics")?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS running_statistics (
                id SERIAL PRIMARY KEY,
                date VARCHAR(10),
                distance VARCHAR(10),
                time VARCHAR(10),
                created_at TIMESTAMP DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create running_statistics")?;

        tracing::info!("Schema ready");
        Ok(())
    }
}

#[async_trait]
impl StatisticStore for PgStatisticStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> runlog_core::Result<Vec<RunningStatistic>> {
        let rows: Vec<StatisticRow> = sqlx::query_as(
            r#"
            SELECT id, date, distance, time, created_at
            FROM running_statistics
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, new: NewRunningStatistic) -> runlog_core::Result<RunningStatistic> {
        validate_new_statistic(&new)?;

        let row: StatisticRow = sqlx::query_as(
            r#"
            INSERT INTO running_statistics (date, distance, time)
            VALUES ($1, $2, $3)
            RETURNING id, date, distance, time, created_at
            "#,
        )
        .bind(&new.date)
        .bind(&new.distance)
        .bind(&new.time)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;

        Ok(row.into())
    }

    async fn get(&self, id: StatisticId) -> runlog_core::Result<RunningStatistic> {
        let row: Option<StatisticRow> = sqlx::query_as(
            r#"
            SELECT id, date, distance, time, created_at
            FROM running_statistics WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;

        row.map(|r| r.into()).ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: StatisticId) -> runlog_core::Result<()> {
        let result = sqlx::query("DELETE FROM running_statistics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> runlog_core::Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM running_statistics")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;

        Ok(count.max(0) as usize)
    }

    async fn ping(&self) -> runlog_core::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StoreError::unavailable)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

// Helper struct for sqlx query_as; the columns carry no NOT NULL constraint
#[derive(sqlx::FromRow)]
struct StatisticRow {
    id: i32,
    date: Option<String>,
    distance: Option<String>,
    time: Option<String>,
    created_at: Option<NaiveDateTime>,
}

impl From<StatisticRow> for RunningStatistic {
    fn from(r: StatisticRow) -> Self {
        RunningStatistic {
            id: r.id,
            date: r.date.unwrap_or_default(),
            distance: r.distance.unwrap_or_default(),
            time: r.time.unwrap_or_default(),
            created_at: r
                .created_at
                .map(|t| t.and_utc())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    #[test]
    fn test_row_conversion() {
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        let record: RunningStatistic = StatisticRow {
            id: 3,
            date: Some("2024-01-01".to_string()),
            distance: Some("5km".to_string()),
            time: Some("00:25:00".to_string()),
            created_at: Some(created_at),
        }
        .into();

        assert_eq!(record.id, 3);
        assert_eq!(record.distance, "5km");
        assert_eq!(record.created_at, created_at.and_utc());
    }

    #[test]
    fn test_row_conversion_tolerates_nulls() {
        let record: RunningStatistic = StatisticRow {
            id: 1,
            date: None,
            distance: None,
            time: None,
            created_at: None,
        }
        .into();

        assert!(record.date.is_empty());
        assert_eq!(record.created_at, DateTime::<Utc>::default());
    }

    async fn live_store() -> PgStatisticStore {
        let url = std::env::var("RUNLOG_TEST_DATABASE_URL")
            .expect("RUNLOG_TEST_DATABASE_URL must point at a scratch database");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .unwrap();
        let store = PgStatisticStore::from_pool(pool);
        store.prepare_schema(true).await.unwrap();
        store
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_postgres_crud() {
        let store = live_store().await;
        let started = Utc::now() - chrono::Duration::seconds(1);

        let created = store
            .create(NewRunningStatistic::new("2024-01-01", "5km", "00:25:00"))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert!(created.created_at >= started);

        assert_eq!(store.get(created.id).await.unwrap(), created);
        assert_eq!(store.list().await.unwrap(), vec![created.clone()]);

        store.delete(created.id).await.unwrap();
        assert_eq!(store.get(created.id).await, Err(StoreError::NotFound(created.id)));
        assert_eq!(store.delete(999_999).await, Err(StoreError::NotFound(999_999)));
        assert_eq!(store.count().await.unwrap(), 0);

        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_postgres_rejects_empty_fields_before_insert() {
        let store = live_store().await;

        let err = store
            .create(NewRunningStatistic::new("", "5km", "00:25:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "date", .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
