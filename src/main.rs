use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fleet_compliance::config::environment::EnvironmentConfig;
use fleet_compliance::database::DatabaseConnection;
use fleet_compliance::state::{build_mailer, AppState};
use fleet_compliance::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    info!("🚛 Fleet Compliance - Notificaciones y Reportes");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    let pool = db_connection.pool().clone();

    if config.elora_api_key.is_none() {
        error!("❌ ELORA_API_KEY no configurada: /api/notifications/check y /api/elora responderán 500");
    }

    let mailer = build_mailer(&config);
    let app_state = AppState::new(pool, config.clone(), mailer)?;
    let app = create_router(app_state);

    if config.is_production() && config.cors_origins.is_empty() {
        error!("❌ CORS_ORIGINS vacío en producción: se permite cualquier origen");
    } else if config.is_development() {
        info!("🛠️ Modo desarrollo");
    }

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔔 Notificaciones:");
    info!("   POST /api/notifications/check - Evaluar reglas y crear notificaciones");
    info!("   GET  /api/notifications - Listar notificaciones de un usuario");
    info!("   POST /api/notifications/:id/read - Marcar como leída");
    info!("   POST /api/notifications/read-all - Marcar todas como leídas");
    info!("   DELETE /api/notifications/:id - Eliminar notificación");
    info!("⚙️ Preferencias:");
    info!("   GET/PUT /api/preferences/:email - Preferencias de notificación");
    info!("   GET/PUT /api/report-preferences/:email - Digest semanal");
    info!("📊 Reportes:");
    info!("   POST /api/reports/send - Enviar reporte");
    info!("🚿 Elora:");
    info!("   GET  /api/elora/vehicles - Vehículos y lavados");
    info!("   GET  /api/elora/dashboard - Resumen del dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
