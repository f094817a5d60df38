//! Evaluador de reglas de notificación
//!
//! Funciones puras sobre un snapshot inmutable de vehículos, mantenimientos,
//! usuarios y preferencias. No hace I/O: `now` se inyecta para que el
//! resultado sea determinista.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;

use crate::models::{
    MaintenanceRecord, NewNotification, NotificationPreference, NotificationType, Severity, User,
    UserRole, Vehicle,
};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Debajo de este porcentaje la baja de cumplimiento es crítica
pub const CRITICAL_COMPLIANCE_RATE: f64 = 25.0;
/// Un mantenimiento a 3 días o menos pasa de `info` a `warning`
pub const URGENT_MAINTENANCE_DAYS: i64 = 3;

/// Datos de entrada de una evaluación
#[derive(Debug, Default, Clone)]
pub struct EvaluationInput {
    pub vehicles: Vec<Vehicle>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub users: Vec<User>,
    pub preferences: Vec<NotificationPreference>,
}

/// Días hasta el servicio, redondeando hacia arriba como hace el dashboard
pub fn days_until(next_service_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (next_service_date - now).num_milliseconds() as f64;
    (diff_ms / MS_PER_DAY).ceil() as i64
}

/// Usuarios que deben recibir alertas sobre un vehículo
pub fn resolve_recipients<'u>(
    users: &'u [User],
    site_id: Option<&str>,
    vehicle_id: &str,
) -> Vec<&'u User> {
    users
        .iter()
        .filter(|user| match user.role() {
            UserRole::Admin => true,
            UserRole::SiteManager => site_id.map_or(false, |site| user.is_assigned_to_site(site)),
            UserRole::Driver => user.is_assigned_to_vehicle(vehicle_id),
            UserRole::Other => false,
        })
        .collect()
}

/// Preferencias efectivas por email; los usuarios sin fila reciben los defaults
pub fn preference_map(
    users: &[User],
    stored: &[NotificationPreference],
) -> HashMap<String, NotificationPreference> {
    let mut map: HashMap<String, NotificationPreference> = stored
        .iter()
        .map(|p| (p.user_email.clone(), p.clone()))
        .collect();
    for user in users {
        map.entry(user.email.clone())
            .or_insert_with(|| NotificationPreference::defaults_for(&user.email));
    }
    map
}

/// Evaluar todas las reglas y devolver las notificaciones candidatas
pub fn evaluate(input: &EvaluationInput, now: DateTime<Utc>) -> Vec<NewNotification> {
    let preferences = preference_map(&input.users, &input.preferences);
    let vehicles_by_id: HashMap<&str, &Vehicle> =
        input.vehicles.iter().map(|v| (v.id.as_str(), v)).collect();

    let mut candidates = Vec::new();

    for record in &input.maintenance_records {
        let vehicle = vehicles_by_id.get(record.vehicle_id.as_str()).copied();
        let site_id = vehicle
            .and_then(|v| v.site_id.as_deref())
            .or(record.site_id.as_deref());

        for user in resolve_recipients(&input.users, site_id, &record.vehicle_id) {
            let Some(prefs) = preferences.get(&user.email) else {
                continue;
            };
            if let Some(candidate) = evaluate_maintenance(record, vehicle, user, prefs, now) {
                candidates.push(candidate);
            }
        }
    }

    for vehicle in &input.vehicles {
        for user in resolve_recipients(&input.users, vehicle.site_id.as_deref(), &vehicle.id) {
            let Some(prefs) = preferences.get(&user.email) else {
                continue;
            };
            if let Some(candidate) = evaluate_compliance(vehicle, user, prefs) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

/// Regla de mantenimiento: vencido o próximo a vencer
pub fn evaluate_maintenance(
    record: &MaintenanceRecord,
    vehicle: Option<&Vehicle>,
    user: &User,
    prefs: &NotificationPreference,
    now: DateTime<Utc>,
) -> Option<NewNotification> {
    let days = days_until(record.next_service_date, now);
    let vehicle_name = record
        .vehicle_name
        .as_deref()
        .or_else(|| vehicle.map(Vehicle::display_name))
        .unwrap_or(&record.vehicle_id);

    let metadata = json!({
        "maintenance_id": record.id.to_string(),
        "vehicle_id": record.vehicle_id,
        "service_type": record.service_type,
        "next_service_date": record.next_service_date.to_rfc3339(),
        "days_until": days,
    });

    if days < 0 {
        if !prefs.notify_maintenance_overdue {
            return None;
        }
        return Some(NewNotification {
            user_email: user.email.clone(),
            notification_type: NotificationType::MaintenanceOverdue,
            severity: Severity::Critical,
            title: "Maintenance Overdue".to_string(),
            message: format!(
                "{} is overdue for {} by {}",
                vehicle_name,
                record.service_type,
                pluralize_days(days.abs())
            ),
            metadata,
        });
    }

    if days > 0 && days <= i64::from(prefs.maintenance_due_days) && prefs.notify_maintenance_due {
        let severity = if days <= URGENT_MAINTENANCE_DAYS {
            Severity::Warning
        } else {
            Severity::Info
        };
        return Some(NewNotification {
            user_email: user.email.clone(),
            notification_type: NotificationType::MaintenanceDue,
            severity,
            title: "Maintenance Due Soon".to_string(),
            message: format!(
                "{} is due for {} in {}",
                vehicle_name,
                record.service_type,
                pluralize_days(days)
            ),
            metadata,
        });
    }

    None
}

/// Regla de cumplimiento de lavados por debajo del umbral del usuario
pub fn evaluate_compliance(
    vehicle: &Vehicle,
    user: &User,
    prefs: &NotificationPreference,
) -> Option<NewNotification> {
    if !prefs.notify_low_compliance {
        return None;
    }
    let rate = vehicle.compliance_rate()?;
    if rate >= prefs.compliance_threshold {
        return None;
    }

    let severity = if rate < CRITICAL_COMPLIANCE_RATE {
        Severity::Critical
    } else {
        Severity::Warning
    };

    Some(NewNotification {
        user_email: user.email.clone(),
        notification_type: NotificationType::LowCompliance,
        severity,
        title: "Low Wash Compliance".to_string(),
        message: format!(
            "{} is at {:.0}% wash compliance ({}/{} washes), below your {:.0}% threshold",
            vehicle.display_name(),
            rate,
            vehicle.washes_completed,
            vehicle.target,
            prefs.compliance_threshold
        ),
        metadata: json!({
            "vehicle_id": vehicle.id,
            "site_id": vehicle.site_id,
            "compliance_rate": (rate * 10.0).round() / 10.0,
            "washes_completed": vehicle.washes_completed,
            "target": vehicle.target,
        }),
    })
}

fn pluralize_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}
