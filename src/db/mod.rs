use crate::config::AppConfig;
use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub mod queries;

pub type DbPool = Pool<Sqlite>;

/// Storage engines the provider knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
}

impl FromStr for Driver {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(AppError::config(format!(
                "database driver '{}' not found",
                other
            ))),
        }
    }
}

/// Owns the process-wide pool. Connects on the first `acquire` and hands out
/// clones of the same pool until `release` closes it.
pub struct ConnectionProvider {
    config: AppConfig,
    pool: Mutex<Option<DbPool>>,
}

impl ConnectionProvider {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            pool: Mutex::new(None),
        }
    }

    pub async fn acquire(&self) -> Result<DbPool> {
        let mut cached = self.pool.lock().await;
        if let Some(pool) = cached.as_ref() {
            return Ok(pool.clone());
        }

        let pool = init_pool(&self.config).await?;
        info!("Connected to database");
        *cached = Some(pool.clone());
        Ok(pool)
    }

    /// Closes the cached pool, if any. A later `acquire` reconnects.
    pub async fn release(&self) {
        if let Some(pool) = self.pool.lock().await.take() {
            pool.close().await;
            info!("Database connection closed");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.pool.lock().await.is_some()
    }
}

pub async fn init_pool(config: &AppConfig) -> Result<DbPool> {
    match config.db_driver.parse::<Driver>()? {
        Driver::Sqlite => init_sqlite_pool(config).await,
    }
}

async fn init_sqlite_pool(config: &AppConfig) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.db_url)
        .map_err(|e| AppError::config(format!("invalid db.url '{}': {}", config.db_url, e)))?
        .create_if_missing(true);

    if !config.db_username.is_empty() {
        debug!("db.username is ignored by the sqlite driver");
    }

    // An in-memory database lives only while a connection is open, so pin one.
    let pool_options = if is_memory_url(&config.db_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(config.db_max_connections.max(1))
    };

    pool_options.connect_with(options).await.map_err(|e| {
        error!("Failed to connect to {}: {}", config.db_url, e);
        AppError::StorageUnavailable(e.to_string())
    })
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Creates both tables if they do not exist yet.
pub async fn bootstrap_schema(pool: &DbPool) -> Result<()> {
    for ddl in [queries::CREATE_ALERTAS_TABLE, queries::CREATE_USUARIOS_TABLE] {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            error!("Schema bootstrap failed: {}", e);
            AppError::Storage(e)
        })?;
    }
    debug!("Schema ready");
    Ok(())
}

#[cfg(test)]
pub(crate) fn memory_config() -> AppConfig {
    AppConfig {
        db_url: "sqlite::memory:".to_string(),
        db_username: String::new(),
        db_password: String::new(),
        db_driver: "sqlite".to_string(),
        db_max_connections: 1,
        log_level: "debug".to_string(),
    }
}

/// Fresh in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn memory_pool() -> DbPool {
    let pool = init_pool(&memory_config()).await.unwrap();
    bootstrap_schema(&pool).await.unwrap();
    pool
}
