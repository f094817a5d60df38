use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::NotificationPreference;
use crate::services::notification_dispatcher::DispatchSummary;
use crate::services::notification_service::CheckOutcome;

// Request para disparar la evaluación; sin company_id se evalúan todas las activas
#[derive(Debug, Default, Deserialize)]
pub struct CheckNotificationsRequest {
    #[serde(default, alias = "companyId")]
    pub company_id: Option<Uuid>,
}

// Response de la evaluación
#[derive(Debug, Serialize)]
pub struct CheckNotificationsResponse {
    pub success: bool,
    pub notifications_created: usize,
    pub message: String,
    pub summary: DispatchSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_companies: Vec<String>,
}

impl From<CheckOutcome> for CheckNotificationsResponse {
    fn from(outcome: CheckOutcome) -> Self {
        let success = outcome.is_success();
        let CheckOutcome {
            summary,
            failed_companies,
        } = outcome;

        let mut message = format!(
            "Created {} notifications ({} duplicates skipped, {} failed)",
            summary.created, summary.skipped_duplicates, summary.failed
        );
        if !failed_companies.is_empty() {
            message.push_str(&format!(
                "; evaluation failed for: {}",
                failed_companies.join(", ")
            ));
        }

        Self {
            success,
            notifications_created: summary.created,
            message,
            summary,
            failed_companies,
        }
    }
}

// Query del listado de notificaciones
#[derive(Debug, Deserialize, Validate)]
pub struct NotificationListQuery {
    #[validate(email)]
    pub user_email: String,
    #[serde(default)]
    pub unread_only: bool,
    #[validate(range(min = 1, max = 200))]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MarkAllReadRequest {
    #[validate(email)]
    pub user_email: String,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub success: bool,
    pub updated: u64,
}

// Request para guardar preferencias de notificación
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationPreferenceRequest {
    #[validate(range(min = 1, max = 90))]
    pub maintenance_due_days: Option<i32>,
    pub notify_maintenance_due: Option<bool>,
    pub notify_maintenance_overdue: Option<bool>,
    pub notify_low_compliance: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub compliance_threshold: Option<f64>,
    pub email_notifications: Option<bool>,
}

impl UpdateNotificationPreferenceRequest {
    /// Aplicar los campos presentes sobre la preferencia actual
    pub fn apply_to(self, mut current: NotificationPreference) -> NotificationPreference {
        if let Some(days) = self.maintenance_due_days {
            current.maintenance_due_days = days;
        }
        if let Some(flag) = self.notify_maintenance_due {
            current.notify_maintenance_due = flag;
        }
        if let Some(flag) = self.notify_maintenance_overdue {
            current.notify_maintenance_overdue = flag;
        }
        if let Some(flag) = self.notify_low_compliance {
            current.notify_low_compliance = flag;
        }
        if let Some(threshold) = self.compliance_threshold {
            current.compliance_threshold = threshold;
        }
        if let Some(flag) = self.email_notifications {
            current.email_notifications = flag;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_response_reports_failed_companies() {
        let outcome = CheckOutcome {
            summary: DispatchSummary {
                created: 2,
                skipped_duplicates: 1,
                ..DispatchSummary::default()
            },
            failed_companies: vec!["Acme Fleet".to_string(), "Beta Wash".to_string()],
        };
        let response = CheckNotificationsResponse::from(outcome);
        assert!(!response.success);
        assert_eq!(response.notifications_created, 2);
        assert!(response.message.contains("Acme Fleet, Beta Wash"));

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["failed_companies"][1], "Beta Wash");
    }

    #[test]
    fn test_check_response_success_without_failures() {
        let response = CheckNotificationsResponse::from(CheckOutcome::default());
        assert!(response.success);
        assert_eq!(response.message, "Created 0 notifications (0 duplicates skipped, 0 failed)");
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("failed_companies").is_none());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let request = UpdateNotificationPreferenceRequest {
            maintenance_due_days: Some(14),
            notify_maintenance_due: None,
            notify_maintenance_overdue: Some(false),
            notify_low_compliance: None,
            compliance_threshold: None,
            email_notifications: None,
        };
        let updated = request.apply_to(NotificationPreference::defaults_for("a@example.com"));
        assert_eq!(updated.maintenance_due_days, 14);
        assert!(!updated.notify_maintenance_overdue);
        assert!(updated.notify_maintenance_due);
        assert_eq!(updated.compliance_threshold, 50.0);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let request = UpdateNotificationPreferenceRequest {
            maintenance_due_days: Some(0),
            notify_maintenance_due: None,
            notify_maintenance_overdue: None,
            notify_low_compliance: None,
            compliance_threshold: Some(120.0),
            email_notifications: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("maintenance_due_days"));
        assert!(fields.contains_key("compliance_threshold"));
    }

    #[test]
    fn test_check_request_accepts_camel_case() {
        let request: CheckNotificationsRequest =
            serde_json::from_str(r#"{"companyId":"00000000-0000-0000-0000-000000000001"}"#).unwrap();
        assert!(request.company_id.is_some());
        let empty: CheckNotificationsRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.company_id.is_none());
    }
}
