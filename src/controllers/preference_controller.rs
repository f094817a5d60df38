use chrono_tz::Tz;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::notification_dto::UpdateNotificationPreferenceRequest;
use crate::dto::report_dto::UpdateReportPreferenceRequest;
use crate::models::{NotificationPreference, ReportPreference};
use crate::repositories::PreferenceRepository;
use crate::services::report_service::{REPORT_TYPE_COMPLIANCE, REPORT_TYPE_MAINTENANCE};
use crate::utils::errors::{validation_error, AppError};

pub struct PreferenceController {
    repository: PreferenceRepository,
}

impl PreferenceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PreferenceRepository::new(pool),
        }
    }

    /// Preferencia guardada o los valores por defecto
    pub async fn get_notification_preference(
        &self,
        user_email: &str,
    ) -> Result<NotificationPreference, AppError> {
        check_email(user_email)?;
        Ok(self
            .repository
            .find_notification_preference(user_email)
            .await?
            .unwrap_or_else(|| NotificationPreference::defaults_for(user_email)))
    }

    pub async fn update_notification_preference(
        &self,
        user_email: &str,
        request: UpdateNotificationPreferenceRequest,
    ) -> Result<NotificationPreference, AppError> {
        request.validate()?;
        let current = self.get_notification_preference(user_email).await?;
        let updated = request.apply_to(current);
        self.repository.upsert_notification_preference(&updated).await
    }

    pub async fn get_report_preference(
        &self,
        user_email: &str,
        default_timezone: Tz,
    ) -> Result<ReportPreference, AppError> {
        check_email(user_email)?;
        Ok(self
            .repository
            .find_report_preference(user_email)
            .await?
            .unwrap_or_else(|| default_report_preference(user_email, default_timezone)))
    }

    pub async fn update_report_preference(
        &self,
        user_email: &str,
        request: UpdateReportPreferenceRequest,
    ) -> Result<ReportPreference, AppError> {
        check_email(user_email)?;
        request.validate()?;

        let existing = self.repository.find_report_preference(user_email).await?;
        let preference = ReportPreference {
            id: existing.as_ref().map_or_else(Uuid::new_v4, |p| p.id),
            user_email: user_email.to_string(),
            company_id: request.company_id,
            enabled: request.enabled,
            day_of_week: request.day_of_week,
            send_time: request.send_time,
            timezone: request.timezone,
            report_types: request.report_types,
            include_charts: request.include_charts,
            last_sent: existing.and_then(|p| p.last_sent),
        };

        self.repository.upsert_report_preference(&preference).await
    }
}

fn check_email(user_email: &str) -> Result<(), AppError> {
    if validator::validate_email(user_email) {
        Ok(())
    } else {
        Err(validation_error("user_email", "must be a valid email address"))
    }
}

/// Digest desactivado, lunes 08:00 en la zona horaria de reportes
fn default_report_preference(user_email: &str, timezone: Tz) -> ReportPreference {
    ReportPreference {
        id: Uuid::new_v4(),
        user_email: user_email.to_string(),
        company_id: None,
        enabled: false,
        day_of_week: 1,
        send_time: "08:00".to_string(),
        timezone: timezone.name().to_string(),
        report_types: vec![
            REPORT_TYPE_COMPLIANCE.to_string(),
            REPORT_TYPE_MAINTENANCE.to_string(),
        ],
        include_charts: false,
        last_sent: None,
    }
}
