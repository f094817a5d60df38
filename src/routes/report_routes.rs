use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{SendReportRequest, SendReportResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/send", post(send_report))
}

async fn send_report(
    State(state): State<AppState>,
    Json(request): Json<SendReportRequest>,
) -> Result<Json<SendReportResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller
        .send(state.elora.as_ref(), state.mailer.as_ref(), request)
        .await?;
    Ok(Json(response))
}
