//! Modelo de MaintenanceRecord

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Próximo servicio programado de un vehículo - tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: String,
    pub vehicle_name: Option<String>,
    /// Sitio del vehículo si Elora no lo devuelve
    pub site_id: Option<String>,
    pub next_service_date: DateTime<Utc>,
    pub service_type: String,
}
