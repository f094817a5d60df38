//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las claves opcionales (Elora, SMTP) no impiden arrancar: se validan en el
//! momento de usarlas para devolver un error de configuración claro.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::env;

/// Configuración SMTP para el envío de emails
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub supabase_service_role_key: Option<String>,
    // Elora (telemetría de lavados)
    pub elora_base_url: String,
    pub elora_api_key: Option<String>,
    pub smtp: Option<SmtpConfig>,
    /// Zona horaria fija para los reportes mensuales
    pub report_timezone: Tz,
    /// URL pública del propio backend, usada por los cron drivers
    pub app_base_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            supabase_service_role_key: None,
            elora_base_url: "https://api.elora.com.au".to_string(),
            elora_api_key: None,
            smtp: None,
            report_timezone: chrono_tz::Australia::Melbourne,
            app_base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", value))?,
            Err(_) => defaults.port,
        };

        let report_timezone = match env::var("REPORT_TIMEZONE") {
            Ok(value) => value
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("REPORT_TIMEZONE '{}' is invalid: {}", value, e))?,
            Err(_) => defaults.report_timezone,
        };

        let smtp = match env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty()) {
            Some(host) => {
                let port = match env::var("SMTP_PORT") {
                    Ok(value) => value
                        .parse()
                        .with_context(|| format!("SMTP_PORT must be a valid number, got '{}'", value))?,
                    Err(_) => 587,
                };
                Some(SmtpConfig {
                    host,
                    port,
                    username: non_empty_var("SMTP_USERNAME"),
                    password: non_empty_var("SMTP_PASSWORD"),
                    from: env::var("SMTP_FROM")
                        .unwrap_or_else(|_| "Fleet Compliance <noreply@fleetcompliance.app>".to_string()),
                })
            }
            None => None,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            supabase_service_role_key: non_empty_var("SUPABASE_SERVICE_ROLE_KEY"),
            elora_base_url: env::var("ELORA_BASE_URL").unwrap_or(defaults.elora_base_url),
            elora_api_key: non_empty_var("ELORA_API_KEY"),
            smtp,
            report_timezone,
            app_base_url: env::var("APP_BASE_URL").unwrap_or(defaults.app_base_url),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:5173, https://app.example.com,,");
        assert_eq!(origins, vec!["http://localhost:5173", "https://app.example.com"]);
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.elora_api_key.is_none());
        assert_eq!(config.report_timezone, chrono_tz::Australia::Melbourne);
    }
}
