//! Preferencias de notificación y de reportes programados

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_MAINTENANCE_DUE_DAYS: i32 = 7;
pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 50.0;

/// Umbrales y toggles por usuario - tabla notification_preferences (clave: user_email)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct NotificationPreference {
    pub user_email: String,
    pub maintenance_due_days: i32,
    pub notify_maintenance_due: bool,
    pub notify_maintenance_overdue: bool,
    pub notify_low_compliance: bool,
    pub compliance_threshold: f64,
    pub email_notifications: bool,
}

impl NotificationPreference {
    /// Valores usados cuando el usuario no tiene fila guardada
    pub fn defaults_for(user_email: &str) -> Self {
        Self {
            user_email: user_email.to_string(),
            maintenance_due_days: DEFAULT_MAINTENANCE_DUE_DAYS,
            notify_maintenance_due: true,
            notify_maintenance_overdue: true,
            notify_low_compliance: true,
            compliance_threshold: DEFAULT_COMPLIANCE_THRESHOLD,
            email_notifications: true,
        }
    }
}

/// Configuración del digest semanal - tabla report_preferences
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportPreference {
    pub id: Uuid,
    pub user_email: String,
    pub company_id: Option<Uuid>,
    pub enabled: bool,
    /// 0 = domingo ... 6 = sábado
    pub day_of_week: i16,
    /// `HH:MM` en la zona horaria del usuario
    pub send_time: String,
    pub timezone: String,
    pub report_types: Vec<String>,
    pub include_charts: bool,
    pub last_sent: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreference::defaults_for("ops@example.com");
        assert_eq!(prefs.user_email, "ops@example.com");
        assert_eq!(prefs.maintenance_due_days, 7);
        assert!(prefs.notify_maintenance_due);
        assert!(prefs.notify_maintenance_overdue);
        assert!(prefs.notify_low_compliance);
        assert_eq!(prefs.compliance_threshold, 50.0);
    }
}
