use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::clients::EloraClient;
use crate::dto::notification_dto::{
    CheckNotificationsRequest, CheckNotificationsResponse, MarkAllReadRequest, MarkAllReadResponse,
    NotificationListQuery,
};
use crate::models::Notification;
use crate::repositories::NotificationRepository;
use crate::services::mailer::Mailer;
use crate::services::NotificationService;
use crate::utils::errors::AppError;

const DEFAULT_LIST_LIMIT: i64 = 50;

pub struct NotificationController {
    pool: PgPool,
    repository: NotificationRepository,
}

impl NotificationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Ejecutar una pasada de reglas y devolver cuántas notificaciones se crearon
    pub async fn check(
        &self,
        elora: Option<&EloraClient>,
        mailer: &dyn Mailer,
        request: CheckNotificationsRequest,
    ) -> Result<CheckNotificationsResponse, AppError> {
        let service = NotificationService::new(self.pool.clone(), elora, mailer);
        let outcome = service.check(request.company_id, Utc::now()).await?;
        Ok(outcome.into())
    }

    pub async fn list(&self, query: NotificationListQuery) -> Result<Vec<Notification>, AppError> {
        query.validate()?;
        self.repository
            .list_for_user(
                &query.user_email,
                query.unread_only,
                query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            )
            .await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, AppError> {
        self.repository.mark_read(id).await
    }

    pub async fn mark_all_read(
        &self,
        request: MarkAllReadRequest,
    ) -> Result<MarkAllReadResponse, AppError> {
        request.validate()?;
        let updated = self.repository.mark_all_read(&request.user_email).await?;
        Ok(MarkAllReadResponse {
            success: true,
            updated,
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
