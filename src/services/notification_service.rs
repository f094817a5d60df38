//! Servicio de notificaciones
//!
//! Orquesta una pasada de evaluación por empresa: vehículos desde Elora,
//! mantenimientos, usuarios y preferencias desde Postgres, evaluación pura
//! y dispatch.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::clients::EloraClient;
use crate::models::Company;
use crate::repositories::{
    CompanyRepository, MaintenanceRepository, NotificationRepository, PreferenceRepository,
    UserRepository,
};
use crate::services::mailer::Mailer;
use crate::services::notification_dispatcher::{dispatch, DispatchSummary};
use crate::services::rule_evaluator::{evaluate, preference_map, EvaluationInput};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Resultado de una pasada de evaluación
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CheckOutcome {
    pub summary: DispatchSummary,
    /// Empresas cuya evaluación falló entera (Elora o base de datos)
    pub failed_companies: Vec<String>,
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        self.failed_companies.is_empty()
    }
}

pub struct NotificationService<'a> {
    companies: CompanyRepository,
    users: UserRepository,
    maintenance: MaintenanceRepository,
    preferences: PreferenceRepository,
    notifications: NotificationRepository,
    elora: Option<&'a EloraClient>,
    mailer: &'a dyn Mailer,
}

impl<'a> NotificationService<'a> {
    pub fn new(pool: sqlx::PgPool, elora: Option<&'a EloraClient>, mailer: &'a dyn Mailer) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            preferences: PreferenceRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
            elora,
            mailer,
        }
    }

    /// Evaluar reglas para una empresa o para todas las activas.
    ///
    /// Con `company_id` explícito cualquier error (incluido el de Elora con su
    /// status y body) se devuelve al llamador. En la pasada global un error
    /// por empresa se registra y la empresa queda en `failed_companies`.
    pub async fn check(&self, company_id: Option<Uuid>, now: DateTime<Utc>) -> AppResult<CheckOutcome> {
        // Sin clave de Elora no se hace ningún trabajo
        let elora = self
            .elora
            .ok_or_else(|| AppError::Config("ELORA_API_KEY is not configured".to_string()))?;

        if let Some(id) = company_id {
            let company = self
                .companies
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found_error("Company", &id.to_string()))?;
            info!("🔔 Evaluando notificaciones para {}", company.name);
            let summary = self.check_company(elora, &company, now).await?;
            return Ok(CheckOutcome {
                summary,
                failed_companies: Vec::new(),
            });
        }

        let companies = self.companies.find_active().await?;
        info!("🔔 Evaluando notificaciones para {} empresa(s)", companies.len());

        let mut outcome = CheckOutcome::default();
        for company in &companies {
            match self.check_company(elora, company, now).await {
                Ok(summary) => {
                    info!(
                        company = %company.name,
                        created = summary.created,
                        skipped = summary.skipped_duplicates,
                        failed = summary.failed,
                        "✅ Empresa evaluada"
                    );
                    outcome.summary.merge(&summary);
                }
                Err(e) => {
                    error!(company = %company.name, "❌ Error evaluando empresa: {}", e);
                    outcome.failed_companies.push(company.name.clone());
                }
            }
        }

        Ok(outcome)
    }

    async fn check_company(
        &self,
        elora: &EloraClient,
        company: &Company,
        now: DateTime<Utc>,
    ) -> AppResult<DispatchSummary> {
        let vehicles = match company.elora_customer_ref.as_deref() {
            Some(customer_ref) => elora.list_vehicles(customer_ref, None).await?,
            None => {
                warn!("⚠️ {} no tiene cliente Elora asociado, solo mantenimiento", company.name);
                Vec::new()
            }
        };
        let maintenance_records = self.maintenance.find_by_company(company.id).await?;
        let users = self.users.find_by_company(company.id).await?;
        if users.is_empty() {
            return Ok(DispatchSummary::default());
        }

        let emails: Vec<String> = users.iter().map(|u| u.email.clone()).collect();
        let preferences = self.preferences.find_notification_preferences(&emails).await?;

        let input = EvaluationInput {
            vehicles,
            maintenance_records,
            users,
            preferences,
        };
        let candidates = evaluate(&input, now);
        let effective = preference_map(&input.users, &input.preferences);

        Ok(dispatch(&candidates, &effective, &self.notifications, self.mailer).await)
    }
}
