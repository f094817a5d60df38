//! Modelos de reportes: rango de fechas y resumen del periodo

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rango de fechas inclusivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Fila por vehículo dentro del reporte
#[derive(Debug, Clone, Serialize)]
pub struct VehicleComplianceRow {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub site_name: Option<String>,
    pub washes_completed: i64,
    pub target: i64,
    pub compliance_rate: Option<f64>,
}

/// Mantenimiento a mostrar en el reporte
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceRow {
    pub vehicle_name: String,
    pub service_type: String,
    pub next_service_date: NaiveDate,
    pub overdue: bool,
}

/// Resumen calculado para un periodo
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub company_name: String,
    pub date_range: DateRange,
    pub vehicle_count: usize,
    pub total_washes: i64,
    pub average_compliance: Option<f64>,
    pub low_compliance: Vec<VehicleComplianceRow>,
    pub maintenance: Vec<MaintenanceRow>,
    pub include_compliance: bool,
    pub include_maintenance: bool,
}
