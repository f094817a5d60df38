//! Rutas HTTP
//!
//! `create_router` arma el router completo con CORS y trazas; cada área
//! define su propio sub-router.

pub mod elora_routes;
pub mod notification_routes;
pub mod preference_routes;
pub mod report_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::database::ping;
use crate::middleware::cors::cors_layer_for;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/notifications", notification_routes::create_notification_router())
        .nest("/api/reports", report_routes::create_report_router())
        .nest("/api/preferences", preference_routes::create_preference_router())
        .nest(
            "/api/report-preferences",
            preference_routes::create_report_preference_router(),
        )
        .nest("/api/elora", elora_routes::create_elora_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check; la base de datos se reporta pero no tumba el endpoint
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match tokio::time::timeout(Duration::from_secs(2), ping(&state.pool)).await {
        Ok(Ok(())) => "ok",
        Ok(Err(e)) => {
            tracing::warn!("⚠️ Health check: base de datos no disponible: {}", e);
            "unavailable"
        }
        Err(_) => "timeout",
    };

    let status = if database == "ok" { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
