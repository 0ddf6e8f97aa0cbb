//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `RUNLOG_*` environment variables. Nested keys use a
//! double underscore, e.g. `RUNLOG_DATABASE__HOST=localhost`.

use anyhow::{bail, Context, Result};
use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "RUNLOG_CONFIG";

/// Where running statistics are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    /// File holding the database password (a Docker secret by default)
    pub password_file: PathBuf,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub connect_retry_delay_ms: u64,
    /// Drop and recreate the table on startup. Destroys all stored records.
    pub reset_schema: bool,
}

impl DatabaseConfig {
    pub fn connect_retry_delay(&self) -> Duration {
        Duration::from_millis(self.connect_retry_delay_ms)
    }

    /// Read the password from `password_file`, without the trailing newline
    pub fn read_password(&self) -> Result<String> {
        read_secret(&self.password_file)
    }

    pub fn connect_options(&self, password: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
            // `created_at DEFAULT now()` is a TIMESTAMP column, stamp it in UTC
            .options([("timezone", "UTC")])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Value of `Access-Control-Allow-Origin`, `*` or a single origin
    pub cors_allow_origin: String,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load from the optional config file and the environment
    pub fn load() -> Result<Self> {
        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => File::with_name(&path).required(true),
            Err(_) => File::with_name("runlog").required(false),
        };

        let builder = Self::defaults()?.add_source(file).add_source(
            Environment::with_prefix("RUNLOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    /// Built-in defaults, the lowest-priority layer
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("storage", "postgres")?
            .set_default("cors_allow_origin", "*")?
            .set_default("database.host", "db")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.name", "example")?
            .set_default("database.password_file", "/run/secrets/db-password")?
            .set_default("database.max_connections", 5)?
            .set_default("database.connect_attempts", 60)?
            .set_default("database.connect_retry_delay_ms", 1000)?
            .set_default("database.reset_schema", false)?;
        Ok(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: ServerConfig = builder
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("port must be non-zero");
        }
        if self.cors_allow_origin.trim().is_empty() {
            bail!("cors_allow_origin must not be empty");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        if self.database.connect_attempts == 0 {
            bail!("database.connect_attempts must be at least 1");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_secret(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read secret file: {}", path.display()))?;
    Ok(raw.trim_end().to_string())
}
