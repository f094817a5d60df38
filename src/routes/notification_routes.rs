use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::notification_controller::NotificationController;
use crate::dto::notification_dto::{
    CheckNotificationsRequest, CheckNotificationsResponse, MarkAllReadRequest, MarkAllReadResponse,
    NotificationListQuery,
};
use crate::models::Notification;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/check", post(check_notifications))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(delete_notification))
}

/// `company_id` puede venir en la query o en el body JSON
async fn check_notifications(
    State(state): State<AppState>,
    Query(query): Query<CheckNotificationsRequest>,
    body: Option<Json<CheckNotificationsRequest>>,
) -> Result<Json<CheckNotificationsResponse>, AppError> {
    // Falla antes de tocar la base si falta la clave de Elora
    let elora = state.elora()?;
    tracing::info!(
        "🔑 SUPABASE_SERVICE_ROLE_KEY {}",
        if state.config.supabase_service_role_key.is_some() {
            "presente"
        } else {
            "ausente"
        }
    );

    let request = CheckNotificationsRequest {
        company_id: body.and_then(|Json(b)| b.company_id).or(query.company_id),
    };

    let controller = NotificationController::new(state.pool.clone());
    let response = controller
        .check(Some(elora), state.mailer.as_ref(), request)
        .await?;
    Ok(Json(response))
}

async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_read(id).await?;
    Ok(Json(response))
}

async fn mark_all_read(
    State(state): State<AppState>,
    Json(request): Json<MarkAllReadRequest>,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_all_read(request).await?;
    Ok(Json(response))
}

async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Notification deleted"
    })))
}
