//! Dispatcher de notificaciones
//!
//! Persiste cada candidata que pasa la deduplicación y, si el usuario tiene
//! activados los emails, la envía por correo. Un fallo de email no deshace
//! la fila guardada y un fallo por candidata no detiene el lote.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error, warn};

use crate::models::{NewNotification, Notification, NotificationPreference};
use crate::repositories::NotificationStore;
use crate::services::deduplicator;
use crate::services::mailer::{Mailer, OutgoingEmail};

/// Resultado de un lote de dispatch
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DispatchSummary {
    pub created: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
    pub emails_sent: usize,
    pub emails_failed: usize,
}

impl DispatchSummary {
    pub fn merge(&mut self, other: &DispatchSummary) {
        self.created += other.created;
        self.skipped_duplicates += other.skipped_duplicates;
        self.failed += other.failed;
        self.emails_sent += other.emails_sent;
        self.emails_failed += other.emails_failed;
    }
}

pub async fn dispatch(
    candidates: &[NewNotification],
    preferences: &HashMap<String, NotificationPreference>,
    store: &dyn NotificationStore,
    mailer: &dyn Mailer,
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for candidate in candidates {
        match deduplicator::should_create(store, candidate).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(
                    user = %candidate.user_email,
                    kind = %candidate.notification_type,
                    "🔁 Notificación duplicada, se omite"
                );
                summary.skipped_duplicates += 1;
                continue;
            }
            Err(e) => {
                error!(
                    user = %candidate.user_email,
                    kind = %candidate.notification_type,
                    "❌ Error comprobando duplicados: {}",
                    e
                );
                summary.failed += 1;
                continue;
            }
        }

        let created = match store.insert(candidate).await {
            Ok(created) => created,
            Err(e) => {
                error!(
                    user = %candidate.user_email,
                    kind = %candidate.notification_type,
                    "❌ Error guardando notificación: {}",
                    e
                );
                summary.failed += 1;
                continue;
            }
        };
        summary.created += 1;

        let email_enabled = preferences
            .get(&candidate.user_email)
            .map_or(false, |p| p.email_notifications);
        if !email_enabled {
            continue;
        }

        match mailer.send(&notification_email(&created)).await {
            Ok(()) => summary.emails_sent += 1,
            Err(e) => {
                warn!(
                    user = %created.user_email,
                    mailer = mailer.name(),
                    "⚠️ No se pudo enviar el email de la notificación {}: {}",
                    created.id,
                    e
                );
                summary.emails_failed += 1;
            }
        }
    }

    summary
}

fn notification_email(notification: &Notification) -> OutgoingEmail {
    OutgoingEmail {
        to: notification.user_email.clone(),
        subject: format!(
            "[{}] {}",
            notification.severity.to_uppercase(),
            notification.title
        ),
        body: format!(
            "{}\n\n{}\n\nSeverity: {}\nRaised: {}\n\nManage your alert settings in the fleet compliance dashboard.",
            notification.title,
            notification.message,
            notification.severity,
            notification.created_at.format("%Y-%m-%d %H:%M UTC"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::notification_repository::memory::InMemoryNotificationStore;
    use crate::services::mailer::tests::RecordingMailer;
    use crate::services::rule_evaluator::{self, tests as fixtures, EvaluationInput};
    use chrono::Duration;

    fn overdue_input() -> EvaluationInput {
        EvaluationInput {
            vehicles: vec![fixtures::vehicle("V1", "S1", 50, 50)],
            maintenance_records: vec![fixtures::maintenance("V1", Duration::days(-2))],
            users: vec![fixtures::user("admin@example.com", "admin", &[], &[])],
            preferences: Vec::new(),
        }
    }

    #[tokio::test]
    async fn second_run_does_not_duplicate_unread_alert() {
        let input = overdue_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let first = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(first.created, 1);
        assert_eq!(first.emails_sent, 1);

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let second = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped_duplicates, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(mailer.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn read_maintenance_alert_can_be_raised_again() {
        let input = overdue_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        dispatch(&candidates, &prefs, &store, &mailer).await;
        store.mark_all_read().await;

        let again = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(again.created, 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn older_unread_alert_blocks_even_if_newer_copy_was_read() {
        let input = overdue_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        dispatch(&candidates, &prefs, &store, &mailer).await;
        {
            let mut rows = store.rows.lock().await;
            let mut newer = rows[0].clone();
            newer.id = uuid::Uuid::new_v4();
            newer.read = true;
            newer.created_at = rows[0].created_at + Duration::minutes(5);
            rows.push(newer);
        }

        let again = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(again.created, 0);
        assert_eq!(again.skipped_duplicates, 1);
        assert_eq!(store.len().await, 2);
    }

    fn low_compliance_input() -> EvaluationInput {
        EvaluationInput {
            vehicles: vec![fixtures::vehicle("V1", "S1", 10, 50)],
            maintenance_records: Vec::new(),
            users: vec![fixtures::user("admin@example.com", "admin", &[], &[])],
            preferences: Vec::new(),
        }
    }

    #[tokio::test]
    async fn low_compliance_rerun_is_deduplicated() {
        let input = low_compliance_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        assert_eq!(candidates.len(), 1);
        let first = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(first.created, 1);

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let second = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped_duplicates, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.rows.lock().await[0].notification_type, "low_compliance");
    }

    #[tokio::test]
    async fn low_compliance_raised_again_once_read() {
        let input = low_compliance_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        dispatch(&candidates, &prefs, &store, &mailer).await;
        store.mark_all_read().await;

        let again = dispatch(&candidates, &prefs, &store, &mailer).await;
        assert_eq!(again.created, 1);
        assert_eq!(again.skipped_duplicates, 0);
        assert_eq!(store.len().await, 2);
        assert_eq!(mailer.sent.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn email_failure_keeps_persisted_row() {
        let input = overdue_input();
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::failing_for(&["admin@example.com"]);

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let summary = dispatch(&candidates, &prefs, &store, &mailer).await;

        assert_eq!(summary.created, 1);
        assert_eq!(summary.emails_failed, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn email_disabled_only_persists() {
        let mut input = overdue_input();
        let mut stored = NotificationPreference::defaults_for("admin@example.com");
        stored.email_notifications = false;
        input.preferences.push(stored);
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore::default();
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let summary = dispatch(&candidates, &prefs, &store, &mailer).await;

        assert_eq!(summary.created, 1);
        assert_eq!(summary.emails_sent, 0);
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn insert_failure_does_not_abort_batch() {
        let input = EvaluationInput {
            vehicles: vec![fixtures::vehicle("V1", "S1", 5, 50)],
            maintenance_records: vec![],
            users: vec![
                fixtures::user("broken@example.com", "admin", &[], &[]),
                fixtures::user("ok@example.com", "admin", &[], &[]),
            ],
            preferences: Vec::new(),
        };
        let prefs = rule_evaluator::preference_map(&input.users, &input.preferences);
        let store = InMemoryNotificationStore {
            fail_inserts_for: Some("broken@example.com".into()),
            ..Default::default()
        };
        let mailer = RecordingMailer::default();

        let candidates = rule_evaluator::evaluate(&input, fixtures::now());
        let summary = dispatch(&candidates, &prefs, &store, &mailer).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(store.rows.lock().await[0].user_email, "ok@example.com");
    }

    #[test]
    fn email_subject_carries_severity() {
        let notification = Notification {
            id: uuid::Uuid::new_v4(),
            user_email: "a@example.com".into(),
            notification_type: "low_compliance".into(),
            severity: "critical".into(),
            title: "Low Wash Compliance".into(),
            message: "Truck 1 is at 20%".into(),
            metadata: serde_json::json!({}),
            read: false,
            created_at: fixtures::now(),
        };
        let email = notification_email(&notification);
        assert_eq!(email.subject, "[CRITICAL] Low Wash Compliance");
        assert!(email.body.contains("Truck 1 is at 20%"));
    }
}
