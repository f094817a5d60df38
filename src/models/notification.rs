//! Modelo de Notification
//!
//! Este módulo contiene el struct Notification persistido y los enums de
//! tipo y severidad que genera el evaluador de reglas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Tipo de notificación - columna `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    MaintenanceDue,
    MaintenanceOverdue,
    LowCompliance,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::MaintenanceDue => "maintenance_due",
            NotificationType::MaintenanceOverdue => "maintenance_overdue",
            NotificationType::LowCompliance => "low_compliance",
        }
    }

    /// Clave de metadata que identifica el evento para deduplicar
    pub fn metadata_key(&self) -> &'static str {
        match self {
            NotificationType::MaintenanceDue | NotificationType::MaintenanceOverdue => {
                "maintenance_id"
            }
            NotificationType::LowCompliance => "vehicle_id",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severidad de la notificación
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification - mapea a la tabla notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_email: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub severity: String,
    pub title: String,
    pub message: String,
    pub metadata: Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notificación candidata producida por el evaluador, todavía sin persistir
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNotification {
    pub user_email: String,
    pub notification_type: NotificationType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub metadata: Value,
}

impl NewNotification {
    /// Id del evento (mantenimiento o vehículo) usado para deduplicar
    pub fn dedup_id(&self) -> Option<&str> {
        self.metadata
            .get(self.notification_type.metadata_key())
            .and_then(Value::as_str)
    }
}
