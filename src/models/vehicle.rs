//! Modelo de Vehicle
//!
//! Los vehículos no viven en Postgres: se leen de la API de Elora junto con
//! sus contadores de lavados del periodo actual.

use serde::{Deserialize, Serialize};

/// Vehicle tal como lo devuelve Elora
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    #[serde(alias = "vehicleRef", alias = "vehicle_id")]
    pub id: String,
    #[serde(alias = "vehicleName", alias = "vehicleRego", default)]
    pub name: String,
    #[serde(alias = "siteRef", alias = "siteId", default)]
    pub site_id: Option<String>,
    #[serde(alias = "siteName", default)]
    pub site_name: Option<String>,
    #[serde(alias = "washesCompleted", alias = "washCount", default)]
    pub washes_completed: i64,
    #[serde(alias = "washTarget", alias = "washesPerPeriod", default)]
    pub target: i64,
}

impl Vehicle {
    /// Porcentaje de cumplimiento de lavados; `None` si no hay objetivo
    pub fn compliance_rate(&self) -> Option<f64> {
        if self.target <= 0 {
            return None;
        }
        Some(self.washes_completed as f64 / self.target as f64 * 100.0)
    }

    /// Nombre para mostrar en mensajes
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_elora_payload() {
        let raw = r#"{
            "vehicleRef": "V-100",
            "vehicleRego": "1ABC234",
            "siteRef": "S-1",
            "siteName": "Dandenong Depot",
            "washesCompleted": 12,
            "washTarget": 20
        }"#;
        let vehicle: Vehicle = serde_json::from_str(raw).unwrap();
        assert_eq!(vehicle.id, "V-100");
        assert_eq!(vehicle.name, "1ABC234");
        assert_eq!(vehicle.site_id.as_deref(), Some("S-1"));
        assert_eq!(vehicle.washes_completed, 12);
        assert_eq!(vehicle.target, 20);
    }

    #[test]
    fn test_compliance_rate() {
        let mut vehicle = Vehicle {
            id: "V1".into(),
            name: "Truck 1".into(),
            site_id: None,
            site_name: None,
            washes_completed: 10,
            target: 50,
        };
        assert_eq!(vehicle.compliance_rate(), Some(20.0));

        vehicle.target = 0;
        assert_eq!(vehicle.compliance_rate(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let vehicle = Vehicle {
            id: "V9".into(),
            name: " ".into(),
            site_id: None,
            site_name: None,
            washes_completed: 0,
            target: 1,
        };
        assert_eq!(vehicle.display_name(), "V9");
    }
}
