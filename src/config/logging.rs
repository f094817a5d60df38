//! Logging de los cron drivers
//!
//! Los binarios de cron escriben con `log` (env_logger) y la librería con
//! `tracing`. Se instalan los dos por separado: el subscriber de tracing
//! se registra sin el puente `LogTracer` para no pelear con env_logger por
//! el logger global de `log`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Inicializa env_logger y un subscriber de tracing con el mismo `RUST_LOG`
pub fn init_cron_logging(default_level: &str) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init()?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_loggers_installed_once() {
        init_cron_logging("info").unwrap();
        assert!(tracing::dispatcher::has_been_set());
        log::info!("📝 log sigue activo");
        tracing::info!("📝 tracing también");

        // una segunda inicialización devuelve error en vez de entrar en pánico
        assert!(init_cron_logging("info").is_err());
    }
}
