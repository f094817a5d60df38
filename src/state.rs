//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todos los campos son handles inmutables.

use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::EloraClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::mailer::{LogMailer, Mailer, SmtpMailer};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub mailer: Arc<dyn Mailer>,
    pub elora: Option<EloraClient>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, mailer: Arc<dyn Mailer>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let elora = config
            .elora_api_key
            .as_deref()
            .map(|key| EloraClient::with_client(http_client, &config.elora_base_url, key));

        Ok(Self {
            pool,
            config,
            mailer,
            elora,
        })
    }

    /// Cliente de Elora, o error de configuración si falta la API key
    pub fn elora(&self) -> AppResult<&EloraClient> {
        self.elora
            .as_ref()
            .ok_or_else(|| AppError::Config("ELORA_API_KEY is not configured".to_string()))
    }
}

/// SMTP si está configurado; si no (o si falla), emails solo al log
pub fn build_mailer(config: &EnvironmentConfig) -> Arc<dyn Mailer> {
    match &config.smtp {
        Some(smtp) => match SmtpMailer::from_config(smtp) {
            Ok(mailer) => {
                tracing::info!("📧 SMTP configurado en {}:{}", smtp.host, smtp.port);
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::error!("❌ Configuración SMTP inválida, usando log: {}", e);
                Arc::new(LogMailer)
            }
        },
        None => {
            tracing::warn!("⚠️ SMTP no configurado, los emails solo se registran en el log");
            Arc::new(LogMailer)
        }
    }
}
