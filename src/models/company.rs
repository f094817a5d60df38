//! Modelo de Company
//!
//! Tenant del sistema. `elora_customer_ref` enlaza la empresa con su cliente
//! en la API de Elora.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Company - mapea a la tabla companies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub elora_customer_ref: Option<String>,
    pub is_active: bool,
    pub scheduled_reports_enabled: bool,
}
