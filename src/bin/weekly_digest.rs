//! Cron driver del digest semanal
//!
//! Recorre las preferencias activas y envía el digest de los últimos 7 días
//! a quien le toque ahora en su zona horaria. Tras un envío correcto se
//! marca `last_sent`.

use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use log::{debug, error, info, warn};

use fleet_compliance::clients::ReportEndpointClient;
use fleet_compliance::config::{init_cron_logging, DatabaseConfig, EnvironmentConfig};
use fleet_compliance::repositories::PreferenceRepository;
use fleet_compliance::services::report_schedule::{eligibility, weekly_request, Eligibility};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_cron_logging("info")?;

    let config = EnvironmentConfig::from_env()?;
    let pool = DatabaseConfig::from_env()?.create_worker_pool().await?;
    let client = ReportEndpointClient::new(&config.app_base_url)?;
    let preferences = PreferenceRepository::new(pool);

    let enabled = preferences.list_enabled_report_preferences().await?;
    let now = Utc::now();
    info!("📬 Digest semanal: {} preferencia(s) activas", enabled.len());

    let (mut sent, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    for pref in &enabled {
        let Some(request) = weekly_request(pref, now) else {
            match eligibility(pref, now) {
                Eligibility::InvalidSchedule => warn!(
                    "⚠️ {}: horario inválido ({} {})",
                    pref.user_email, pref.send_time, pref.timezone
                ),
                other => debug!("⏭️ {}: {:?}", pref.user_email, other),
            }
            skipped += 1;
            continue;
        };

        match client.send_report(&request).await {
            Ok(response) => {
                info!("✅ Digest enviado a {:?}", response.sent_to);
                if let Err(e) = preferences.stamp_last_sent(pref.id, now).await {
                    error!("❌ {}: no se pudo guardar last_sent: {}", pref.user_email, e);
                }
                sent += 1;
            }
            Err(e) => {
                error!("❌ {}: {:#}", pref.user_email, e);
                failed += 1;
            }
        }
    }

    info!(
        "🏁 Digest semanal terminado: {} enviados, {} omitidos, {} con error",
        sent, skipped, failed
    );
    Ok(())
}
