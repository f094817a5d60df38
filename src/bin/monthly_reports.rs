//! Cron driver del reporte mensual
//!
//! Para cada empresa activa con reportes programados pide el reporte del
//! mes natural anterior (zona horaria fija de `REPORT_TIMEZONE`).

use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use log::{error, info};

use fleet_compliance::clients::ReportEndpointClient;
use fleet_compliance::config::{init_cron_logging, DatabaseConfig, EnvironmentConfig};
use fleet_compliance::repositories::CompanyRepository;
use fleet_compliance::services::report_schedule::monthly_request;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_cron_logging("info")?;

    let config = EnvironmentConfig::from_env()?;
    let pool = DatabaseConfig::from_env()?.create_worker_pool().await?;
    let client = ReportEndpointClient::new(&config.app_base_url)?;

    let companies = CompanyRepository::new(pool)
        .find_with_scheduled_reports()
        .await?;
    let now = Utc::now();
    info!(
        "📅 Reporte mensual: {} empresa(s), endpoint {}",
        companies.len(),
        client.endpoint()
    );

    let (mut sent, mut failed) = (0usize, 0usize);
    for company in &companies {
        let request = monthly_request(company.id, now, config.report_timezone);
        match client.send_report(&request).await {
            Ok(response) => {
                info!(
                    "✅ {} ({} a {}): enviado a {:?}",
                    company.name, request.date_range.start, request.date_range.end, response.sent_to
                );
                sent += 1;
            }
            Err(e) => {
                error!("❌ {}: {:#}", company.name, e);
                failed += 1;
            }
        }
    }

    info!("🏁 Reporte mensual terminado: {} enviados, {} con error", sent, failed);
    Ok(())
}
