use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Row of `alertas`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Alert {
    #[sqlx(rename = "id_alerta")]
    pub id: i64,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "tipo_alerta")]
    pub alert_type: String,
    #[sqlx(rename = "nivel_alerta")]
    pub level: String, // free text, see AlertLevel
    #[sqlx(rename = "sector_afectado")]
    pub sector: String,
    #[sqlx(rename = "descripcion_detallada")]
    pub description: String,
    #[sqlx(rename = "instrucciones_seguridad")]
    pub instructions: Option<String>,
    #[sqlx(rename = "imagen_url")]
    pub image_url: Option<String>,
    #[sqlx(rename = "fecha_creacion")]
    pub created_at: NaiveDateTime,
}

impl Alert {
    /// Parsed severity, or `None` when the stored label is not one of the known levels.
    pub fn severity(&self) -> Option<AlertLevel> {
        self.level.parse().ok()
    }
}

/// Writable fields of an alert, used both to create and to rewrite one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertInput {
    pub title: String,
    pub alert_type: String,
    pub level: String,
    pub sector: String,
    pub description: String,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Alert> for AlertInput {
    fn from(alert: &Alert) -> Self {
        Self {
            title: alert.title.clone(),
            alert_type: alert.alert_type.clone(),
            level: alert.level.clone(),
            sector: alert.sector.clone(),
            description: alert.description.clone(),
            instructions: alert.instructions.clone(),
            image_url: alert.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    Alta,
    Media,
    Baja,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Alta => "ALTA",
            AlertLevel::Media => "MEDIA",
            AlertLevel::Baja => "BAJA",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown alert level '{}'", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for AlertLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALTA" | "HIGH" => Ok(AlertLevel::Alta),
            "MEDIA" | "MEDIUM" => Ok(AlertLevel::Media),
            "BAJA" | "LOW" => Ok(AlertLevel::Baja),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}
