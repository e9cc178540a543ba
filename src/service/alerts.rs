use super::{affected, require, require_id};
use crate::error::{AppError, Result};
use crate::models::{Alert, AlertInput};
use crate::repository::AlertRepository;
use tracing::warn;

#[derive(Clone)]
pub struct AlertService {
    repo: AlertRepository,
}

fn validate(alert: &AlertInput) -> Result<()> {
    require("title", &alert.title)?;
    require("alert type", &alert.alert_type)?;
    require("alert level", &alert.level)?;
    require("sector", &alert.sector)?;
    require("description", &alert.description)
}

impl AlertService {
    pub fn new(repo: AlertRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, alert: &AlertInput) -> Result<()> {
        if let Err(e) = validate(alert) {
            warn!("Rejected alert: {}", e);
            return Err(e);
        }
        affected(self.repo.create(alert).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Alert>> {
        self.repo.list_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Alert> {
        require_id(id)?;
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn update(&self, id: i64, alert: &AlertInput) -> Result<()> {
        require_id(id)?;
        if let Err(e) = validate(alert) {
            warn!("Rejected update of alert {}: {}", id, e);
            return Err(e);
        }
        affected(self.repo.update(id, alert).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        require_id(id)?;
        affected(self.repo.delete(id).await?)
    }

    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Alert>> {
        self.repo.search_by_title(title).await
    }
}
