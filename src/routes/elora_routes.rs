use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::elora_controller::{EloraController, EloraQuery};
use crate::dto::ApiResponse;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_elora_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/dashboard", get(dashboard))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<EloraQuery>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = EloraController::new(state.elora()?);
    let vehicles = controller.vehicles(&query).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<EloraQuery>,
) -> Result<Json<Value>, AppError> {
    let controller = EloraController::new(state.elora()?);
    let response = controller.dashboard(&query).await?;
    Ok(Json(response))
}
