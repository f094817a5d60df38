use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::preference_controller::PreferenceController;
use crate::dto::notification_dto::UpdateNotificationPreferenceRequest;
use crate::dto::report_dto::UpdateReportPreferenceRequest;
use crate::models::{NotificationPreference, ReportPreference};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_preference_router() -> Router<AppState> {
    Router::new().route(
        "/:email",
        get(get_notification_preference).put(update_notification_preference),
    )
}

pub fn create_report_preference_router() -> Router<AppState> {
    Router::new().route(
        "/:email",
        get(get_report_preference).put(update_report_preference),
    )
}

async fn get_notification_preference(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<NotificationPreference>, AppError> {
    let controller = PreferenceController::new(state.pool.clone());
    let response = controller.get_notification_preference(&email).await?;
    Ok(Json(response))
}

async fn update_notification_preference(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<UpdateNotificationPreferenceRequest>,
) -> Result<Json<NotificationPreference>, AppError> {
    let controller = PreferenceController::new(state.pool.clone());
    let response = controller
        .update_notification_preference(&email, request)
        .await?;
    Ok(Json(response))
}

async fn get_report_preference(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ReportPreference>, AppError> {
    let controller = PreferenceController::new(state.pool.clone());
    let response = controller
        .get_report_preference(&email, state.config.report_timezone)
        .await?;
    Ok(Json(response))
}

async fn update_report_preference(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<UpdateReportPreferenceRequest>,
) -> Result<Json<ReportPreference>, AppError> {
    let controller = PreferenceController::new(state.pool.clone());
    let response = controller.update_report_preference(&email, request).await?;
    Ok(Json(response))
}
