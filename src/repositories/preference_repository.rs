use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NotificationPreference, ReportPreference};
use crate::utils::errors::AppResult;

pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_notification_preference(
        &self,
        user_email: &str,
    ) -> AppResult<Option<NotificationPreference>> {
        let preference = sqlx::query_as::<_, NotificationPreference>(
            r#"
            SELECT user_email, maintenance_due_days, notify_maintenance_due, notify_maintenance_overdue,
                   notify_low_compliance, compliance_threshold, email_notifications
            FROM notification_preferences
            WHERE user_email = $1
            "#,
        )
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preference)
    }

    /// Preferencias guardadas de un conjunto de usuarios
    pub async fn find_notification_preferences(
        &self,
        user_emails: &[String],
    ) -> AppResult<Vec<NotificationPreference>> {
        if user_emails.is_empty() {
            return Ok(Vec::new());
        }

        let preferences = sqlx::query_as::<_, NotificationPreference>(
            r#"
            SELECT user_email, maintenance_due_days, notify_maintenance_due, notify_maintenance_overdue,
                   notify_low_compliance, compliance_threshold, email_notifications
            FROM notification_preferences
            WHERE user_email = ANY($1)
            "#,
        )
        .bind(user_emails)
        .fetch_all(&self.pool)
        .await?;

        Ok(preferences)
    }

    pub async fn upsert_notification_preference(
        &self,
        preference: &NotificationPreference,
    ) -> AppResult<NotificationPreference> {
        let saved = sqlx::query_as::<_, NotificationPreference>(
            r#"
            INSERT INTO notification_preferences (
                user_email, maintenance_due_days, notify_maintenance_due, notify_maintenance_overdue,
                notify_low_compliance, compliance_threshold, email_notifications
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_email) DO UPDATE SET
                maintenance_due_days = EXCLUDED.maintenance_due_days,
                notify_maintenance_due = EXCLUDED.notify_maintenance_due,
                notify_maintenance_overdue = EXCLUDED.notify_maintenance_overdue,
                notify_low_compliance = EXCLUDED.notify_low_compliance,
                compliance_threshold = EXCLUDED.compliance_threshold,
                email_notifications = EXCLUDED.email_notifications
            RETURNING user_email, maintenance_due_days, notify_maintenance_due, notify_maintenance_overdue,
                      notify_low_compliance, compliance_threshold, email_notifications
            "#,
        )
        .bind(&preference.user_email)
        .bind(preference.maintenance_due_days)
        .bind(preference.notify_maintenance_due)
        .bind(preference.notify_maintenance_overdue)
        .bind(preference.notify_low_compliance)
        .bind(preference.compliance_threshold)
        .bind(preference.email_notifications)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn find_report_preference(&self, user_email: &str) -> AppResult<Option<ReportPreference>> {
        let preference = sqlx::query_as::<_, ReportPreference>(
            r#"
            SELECT id, user_email, company_id, enabled, day_of_week, send_time, timezone,
                   COALESCE(report_types, '{}') AS report_types, include_charts, last_sent
            FROM report_preferences
            WHERE user_email = $1
            "#,
        )
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preference)
    }

    /// Preferencias de digest semanal activas
    pub async fn list_enabled_report_preferences(&self) -> AppResult<Vec<ReportPreference>> {
        let preferences = sqlx::query_as::<_, ReportPreference>(
            r#"
            SELECT id, user_email, company_id, enabled, day_of_week, send_time, timezone,
                   COALESCE(report_types, '{}') AS report_types, include_charts, last_sent
            FROM report_preferences
            WHERE enabled = TRUE
            ORDER BY user_email
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(preferences)
    }

    pub async fn upsert_report_preference(
        &self,
        preference: &ReportPreference,
    ) -> AppResult<ReportPreference> {
        let saved = sqlx::query_as::<_, ReportPreference>(
            r#"
            INSERT INTO report_preferences (
                id, user_email, company_id, enabled, day_of_week, send_time, timezone,
                report_types, include_charts, last_sent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_email) DO UPDATE SET
                company_id = EXCLUDED.company_id,
                enabled = EXCLUDED.enabled,
                day_of_week = EXCLUDED.day_of_week,
                send_time = EXCLUDED.send_time,
                timezone = EXCLUDED.timezone,
                report_types = EXCLUDED.report_types,
                include_charts = EXCLUDED.include_charts
            RETURNING id, user_email, company_id, enabled, day_of_week, send_time, timezone,
                      COALESCE(report_types, '{}') AS report_types, include_charts, last_sent
            "#,
        )
        .bind(preference.id)
        .bind(&preference.user_email)
        .bind(preference.company_id)
        .bind(preference.enabled)
        .bind(preference.day_of_week)
        .bind(&preference.send_time)
        .bind(&preference.timezone)
        .bind(&preference.report_types)
        .bind(preference.include_charts)
        .bind(preference.last_sent)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn stamp_last_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE report_preferences SET last_sent = $2 WHERE id = $1")
            .bind(id)
            .bind(sent_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
