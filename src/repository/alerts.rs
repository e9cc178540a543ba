use crate::db::{queries, DbPool};
use crate::error::Result;
use crate::models::{Alert, AlertInput};
use tracing::{debug, error};

/// SQL access to `alertas`. Each call runs as its own auto-committed statement.
#[derive(Clone)]
pub struct AlertRepository {
    pool: DbPool,
}

impl AlertRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new alert; storage stamps `fecha_creacion`.
    pub async fn create(&self, alert: &AlertInput) -> Result<bool> {
        let result = sqlx::query(queries::INSERT_ALERTA)
            .bind(&alert.title)
            .bind(&alert.alert_type)
            .bind(&alert.level)
            .bind(&alert.sector)
            .bind(&alert.description)
            .bind(&alert.instructions)
            .bind(&alert.image_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to create alert '{}': {}", alert.title, e);
                e
            })?;

        debug!("Created alert '{}'", alert.title);
        Ok(result.rows_affected() > 0)
    }

    /// All alerts, newest first.
    pub async fn list_all(&self) -> Result<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, Alert>(queries::SELECT_ALERTAS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list alerts: {}", e);
                e
            })?;
        Ok(alerts)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Alert>> {
        let alert = sqlx::query_as::<_, Alert>(queries::SELECT_ALERTA_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to load alert {}: {}", id, e);
                e
            })?;
        Ok(alert)
    }

    /// Rewrites every writable field of alert `id`. Id and creation time are kept.
    pub async fn update(&self, id: i64, alert: &AlertInput) -> Result<bool> {
        let result = sqlx::query(queries::UPDATE_ALERTA)
            .bind(&alert.title)
            .bind(&alert.alert_type)
            .bind(&alert.level)
            .bind(&alert.sector)
            .bind(&alert.description)
            .bind(&alert.instructions)
            .bind(&alert.image_url)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update alert {}: {}", id, e);
                e
            })?;

        debug!("Updated alert {} ({} rows)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(queries::DELETE_ALERTA)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete alert {}: {}", id, e);
                e
            })?;

        debug!("Deleted alert {} ({} rows)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    /// Alerts whose title contains `title` literally. An empty term matches all.
    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, Alert>(queries::SEARCH_ALERTAS_BY_TITULO)
            .bind(queries::like_pattern(title))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to search alerts by '{}': {}", title, e);
                e
            })?;
        Ok(alerts)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_ALERTAS)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count alerts: {}", e);
                e
            })?;
        Ok(count)
    }
}
