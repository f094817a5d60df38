use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewNotification, Notification, NotificationType};
use crate::utils::errors::{AppError, AppResult};

/// Acceso a notificaciones que necesitan el deduplicador y el dispatcher
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Notificaciones del usuario con ese tipo y ese id en metadata, más recientes primero
    async fn find_matching(
        &self,
        user_email: &str,
        notification_type: NotificationType,
        metadata_key: &str,
        metadata_id: &str,
    ) -> AppResult<Vec<Notification>>;

    async fn insert(&self, notification: &NewNotification) -> AppResult<Notification>;
}

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(
        &self,
        user_email: &str,
        unread_only: bool,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_email, type, severity, title, message, metadata, read, created_at
            FROM notifications
            WHERE user_email = $1 AND ($2 = FALSE OR read = FALSE)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_email)
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_read(&self, id: Uuid) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1
            RETURNING id, user_email, type, severity, title, message, metadata, read, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notification '{}' not found", id)))
    }

    pub async fn mark_all_read(&self, user_email: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_email = $1 AND read = FALSE",
        )
        .bind(user_email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Notification '{}' not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find_matching(
        &self,
        user_email: &str,
        notification_type: NotificationType,
        metadata_key: &str,
        metadata_id: &str,
    ) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_email, type, severity, title, message, metadata, read, created_at
            FROM notifications
            WHERE user_email = $1 AND type = $2 AND metadata ->> $3 = $4
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_email)
        .bind(notification_type.as_str())
        .bind(metadata_key)
        .bind(metadata_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn insert(&self, notification: &NewNotification) -> AppResult<Notification> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (id, user_email, type, severity, title, message, metadata, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
            RETURNING id, user_email, type, severity, title, message, metadata, read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&notification.user_email)
        .bind(notification.notification_type.as_str())
        .bind(notification.severity.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.metadata)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
