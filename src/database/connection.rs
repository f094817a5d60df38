//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool contra la base de Supabase y expone un ping
//! para el health check.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::{mask_database_url, DatabaseConfig};

/// Conexión compartida a la base de datos
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool a partir de la configuración
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🗄️ Conectando a {}", mask_database_url(&config.url));
        let pool = config
            .create_pool()
            .await
            .context("failed to connect to the database")?;
        info!("✅ Base de datos conectada");
        Ok(Self { pool })
    }

    /// Crear el pool usando `DATABASE_URL`
    pub async fn new_default() -> Result<Self> {
        Self::new(&DatabaseConfig::from_env()?).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Verificar que la conexión funciona
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
