//! Cliente HTTP para la API de Elora
//!
//! Elora es la plataforma de telemetría de lavados: expone los vehículos
//! de cada cliente con sus contadores de lavados y un resumen de dashboard.
//! Las respuestas no exitosas se devuelven como `AppError::Upstream` con el
//! status y el body originales.

use reqwest::Client;
use serde_json::Value;

use crate::models::{DateRange, Vehicle};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct EloraClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EloraClient {
    /// Reutilizar un `reqwest::Client` existente
    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Vehículos del cliente con sus lavados en el periodo
    pub async fn list_vehicles(
        &self,
        customer_ref: &str,
        range: Option<DateRange>,
    ) -> AppResult<Vec<Vehicle>> {
        let payload = self
            .get_json("/vehicles", &query_params(customer_ref, range))
            .await?;

        let items = extract_list(payload);
        let mut vehicles = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Vehicle>(item) {
                Ok(vehicle) => vehicles.push(vehicle),
                Err(e) => log::warn!("⚠️ Vehículo de Elora ignorado, formato inesperado: {}", e),
            }
        }

        log::info!("🚛 Elora devolvió {} vehículos para {}", vehicles.len(), customer_ref);
        Ok(vehicles)
    }

    /// Resumen del dashboard tal cual lo devuelve Elora
    pub async fn dashboard(&self, customer_ref: &str, range: Option<DateRange>) -> AppResult<Value> {
        self.get_json("/dashboard", &query_params(customer_ref, range))
            .await
    }

    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        log::info!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📡 Elora response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("Invalid JSON from Elora: {}", e)))
    }
}

fn query_params(customer_ref: &str, range: Option<DateRange>) -> Vec<(&'static str, String)> {
    let mut params = vec![("customer", customer_ref.to_string())];
    if let Some(range) = range {
        params.push(("fromDate", range.start.format("%Y-%m-%d").to_string()));
        params.push(("toDate", range.end.format("%Y-%m-%d").to_string()));
    }
    params
}

/// Elora responde a veces con un array y a veces con `{ "data": [...] }`
fn extract_list(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("vehicles")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
