//! Modelo de User
//!
//! Usuario del dashboard con su rol y las asignaciones de sitios / vehículos
//! que determinan qué notificaciones recibe.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol del usuario - la columna `role` es texto libre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    SiteManager,
    Driver,
    Other,
}

impl UserRole {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => UserRole::Admin,
            "site_manager" => UserRole::SiteManager,
            "driver" => UserRole::Driver,
            _ => UserRole::Other,
        }
    }
}

/// User - mapea a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub company_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub assigned_sites: Vec<String>,
    pub assigned_vehicles: Vec<String>,
}

impl User {
    pub fn role(&self) -> UserRole {
        UserRole::parse(&self.role)
    }

    pub fn is_assigned_to_site(&self, site_id: &str) -> bool {
        self.assigned_sites.iter().any(|s| s == site_id)
    }

    pub fn is_assigned_to_vehicle(&self, vehicle_id: &str) -> bool {
        self.assigned_vehicles.iter().any(|v| v == vehicle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("Site_Manager"), UserRole::SiteManager);
        assert_eq!(UserRole::parse("driver"), UserRole::Driver);
        assert_eq!(UserRole::parse("viewer"), UserRole::Other);
        assert_eq!(UserRole::parse(""), UserRole::Other);
    }
}
