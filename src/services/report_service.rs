//! Servicio de envío de reportes
//!
//! Resuelve destinatarios, junta los datos del periodo (Elora + Postgres),
//! arma un resumen y lo envía por email a cada destinatario. Un fallo de
//! envío a un destinatario se registra y no corta el resto.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use tracing::{info, warn};

use crate::clients::EloraClient;
use crate::dto::report_dto::{SendReportRequest, SendReportResponse};
use crate::models::preference::DEFAULT_COMPLIANCE_THRESHOLD;
use crate::models::report::{MaintenanceRow, VehicleComplianceRow};
use crate::models::{Company, DateRange, MaintenanceRecord, ReportSummary, Vehicle};
use crate::repositories::{CompanyRepository, MaintenanceRepository, UserRepository};
use crate::services::mailer::{Mailer, OutgoingEmail};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub const REPORT_TYPE_COMPLIANCE: &str = "compliance";
pub const REPORT_TYPE_MAINTENANCE: &str = "maintenance";

/// Sin tipos explícitos se incluyen todas las secciones
fn wants_section(report_types: &[String], section: &str) -> bool {
    report_types.is_empty() || report_types.iter().any(|t| t.eq_ignore_ascii_case(section))
}

pub fn build_summary(
    company_name: &str,
    date_range: DateRange,
    vehicles: &[Vehicle],
    maintenance: &[MaintenanceRecord],
    report_types: &[String],
    now: DateTime<Utc>,
) -> ReportSummary {
    let rates: Vec<f64> = vehicles.iter().filter_map(Vehicle::compliance_rate).collect();
    let average_compliance = if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    };

    let mut low_compliance: Vec<VehicleComplianceRow> = vehicles
        .iter()
        .filter(|v| {
            v.compliance_rate()
                .map_or(false, |rate| rate < DEFAULT_COMPLIANCE_THRESHOLD)
        })
        .map(|v| VehicleComplianceRow {
            vehicle_id: v.id.clone(),
            vehicle_name: v.display_name().to_string(),
            site_name: v.site_name.clone(),
            washes_completed: v.washes_completed,
            target: v.target,
            compliance_rate: v.compliance_rate(),
        })
        .collect();
    low_compliance.sort_by(|a, b| {
        a.compliance_rate
            .partial_cmp(&b.compliance_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let maintenance_rows = maintenance
        .iter()
        .filter_map(|record| {
            let overdue = record.next_service_date < now;
            let service_date = record.next_service_date.date_naive();
            if !overdue && !date_range.contains(service_date) {
                return None;
            }
            Some(MaintenanceRow {
                vehicle_name: record
                    .vehicle_name
                    .clone()
                    .unwrap_or_else(|| record.vehicle_id.clone()),
                service_type: record.service_type.clone(),
                next_service_date: service_date,
                overdue,
            })
        })
        .collect();

    ReportSummary {
        company_name: company_name.to_string(),
        date_range,
        vehicle_count: vehicles.len(),
        total_washes: vehicles.iter().map(|v| v.washes_completed).sum(),
        average_compliance,
        low_compliance,
        maintenance: maintenance_rows,
        include_compliance: wants_section(report_types, REPORT_TYPE_COMPLIANCE),
        include_maintenance: wants_section(report_types, REPORT_TYPE_MAINTENANCE),
    }
}

/// Texto plano del digest
pub fn render_report(summary: &ReportSummary) -> (String, String) {
    let subject = format!(
        "{} fleet compliance report: {} to {}",
        summary.company_name, summary.date_range.start, summary.date_range.end
    );

    let mut body = String::new();
    let _ = writeln!(body, "Fleet compliance report for {}", summary.company_name);
    let _ = writeln!(
        body,
        "Period: {} to {} ({} days)\n",
        summary.date_range.start,
        summary.date_range.end,
        summary.date_range.days()
    );

    if summary.include_compliance {
        let _ = writeln!(body, "WASH COMPLIANCE");
        let _ = writeln!(body, "Vehicles: {}", summary.vehicle_count);
        let _ = writeln!(body, "Total washes: {}", summary.total_washes);
        match summary.average_compliance {
            Some(avg) => {
                let _ = writeln!(body, "Average compliance: {:.1}%", avg);
            }
            None => {
                let _ = writeln!(body, "Average compliance: n/a");
            }
        }
        if summary.low_compliance.is_empty() {
            let _ = writeln!(body, "All vehicles are at or above {:.0}% compliance.", DEFAULT_COMPLIANCE_THRESHOLD);
        } else {
            let _ = writeln!(body, "Below {:.0}% compliance:", DEFAULT_COMPLIANCE_THRESHOLD);
            for row in &summary.low_compliance {
                let _ = writeln!(
                    body,
                    "  - {}{}: {}/{} washes ({:.0}%)",
                    row.vehicle_name,
                    row.site_name
                        .as_deref()
                        .map(|s| format!(" @ {}", s))
                        .unwrap_or_default(),
                    row.washes_completed,
                    row.target,
                    row.compliance_rate.unwrap_or(0.0)
                );
            }
        }
        body.push('\n');
    }

    if summary.include_maintenance {
        let _ = writeln!(body, "MAINTENANCE");
        if summary.maintenance.is_empty() {
            let _ = writeln!(body, "No maintenance due or overdue in this period.");
        } else {
            for row in &summary.maintenance {
                let _ = writeln!(
                    body,
                    "  - {}: {} on {}{}",
                    row.vehicle_name,
                    row.service_type,
                    row.next_service_date,
                    if row.overdue { " (OVERDUE)" } else { "" }
                );
            }
        }
    }

    (subject, body)
}

pub struct ReportService<'a> {
    companies: CompanyRepository,
    users: UserRepository,
    maintenance: MaintenanceRepository,
    elora: Option<&'a EloraClient>,
    mailer: &'a dyn Mailer,
}

impl<'a> ReportService<'a> {
    pub fn new(pool: sqlx::PgPool, elora: Option<&'a EloraClient>, mailer: &'a dyn Mailer) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
            elora,
            mailer,
        }
    }

    pub async fn send_report(&self, request: &SendReportRequest) -> AppResult<SendReportResponse> {
        info!(
            cron_mode = request.cron_mode,
            company_id = ?request.company_id,
            user_email = ?request.user_email,
            "📊 Preparando reporte {} a {}",
            request.date_range.start,
            request.date_range.end
        );

        let company = self.resolve_company(request).await?;
        let recipients = match &request.user_email {
            Some(email) => vec![email.clone()],
            None => self
                .users
                .find_admins(company.id)
                .await?
                .into_iter()
                .map(|u| u.email)
                .collect(),
        };

        if recipients.is_empty() {
            warn!("⚠️ {} no tiene destinatarios para el reporte", company.name);
            return Ok(SendReportResponse {
                sent_to: Vec::new(),
                failed: Vec::new(),
            });
        }

        let vehicles = self.load_vehicles(&company, request.date_range).await?;
        let maintenance = self.maintenance.find_by_company(company.id).await?;
        let summary = build_summary(
            &company.name,
            request.date_range,
            &vehicles,
            &maintenance,
            &request.report_types,
            Utc::now(),
        );
        let (subject, body) = render_report(&summary);

        let mut response = SendReportResponse {
            sent_to: Vec::new(),
            failed: Vec::new(),
        };
        for recipient in recipients {
            let email = OutgoingEmail {
                to: recipient.clone(),
                subject: subject.clone(),
                body: body.clone(),
            };
            match self.mailer.send(&email).await {
                Ok(()) => response.sent_to.push(recipient),
                Err(e) => {
                    warn!("⚠️ Reporte no enviado a {}: {}", recipient, e);
                    response.failed.push(recipient);
                }
            }
        }

        info!(
            "✅ Reporte de {} enviado a {} destinatario(s)",
            company.name,
            response.sent_to.len()
        );
        Ok(response)
    }

    async fn resolve_company(&self, request: &SendReportRequest) -> AppResult<Company> {
        let company_id = match (request.company_id, &request.user_email) {
            (Some(id), _) => id,
            (None, Some(email)) => {
                self.users
                    .find_by_email(email)
                    .await?
                    .ok_or_else(|| not_found_error("User", email))?
                    .company_id
            }
            (None, None) => {
                return Err(AppError::BadRequest(
                    "companyId or userEmail is required".to_string(),
                ))
            }
        };

        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| not_found_error("Company", &company_id.to_string()))
    }

    async fn load_vehicles(&self, company: &Company, range: DateRange) -> AppResult<Vec<Vehicle>> {
        let Some(customer_ref) = company.elora_customer_ref.as_deref() else {
            warn!("⚠️ {} no tiene cliente Elora asociado", company.name);
            return Ok(Vec::new());
        };
        let elora = self
            .elora
            .ok_or_else(|| AppError::Config("ELORA_API_KEY is not configured".to_string()))?;
        elora.list_vehicles(customer_ref, Some(range)).await
    }
}
