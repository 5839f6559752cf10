use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sales_registry::config::{DatabaseConfig, EnvironmentConfig};
use sales_registry::database::{setup_database, DatabaseConnection};
use sales_registry::repositories::PgSalesStore;
use sales_registry::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏍️ Registro de Ventas - API de carga masiva");
    info!("============================================");

    let config = EnvironmentConfig::from_env().context("Configuración de entorno inválida")?;
    let db_config = DatabaseConfig::from_env().context("Configuración de base de datos inválida")?;

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    setup_database(db_connection.pool())
        .await
        .context("No se pudo preparar el schema de la base de datos")?;

    tokio::fs::create_dir_all(&config.upload_path)
        .await
        .with_context(|| format!("No se pudo crear {}", config.upload_path.display()))?;

    if !config.is_development() && config.cors_origins.iter().any(|o| o == "*") {
        warn!("⚠️ CORS abierto a cualquier origen fuera de desarrollo");
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("HOST/PORT inválidos: {}", config.server_url()))?;
    let store = Arc::new(PgSalesStore::new(db_connection.pool().clone()));
    let app = create_app_router(AppState::new(store, config.clone()));

    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/v1/ventas - Registrar una venta");
    info!("   POST /api/v1/ventas/batch - Carga masiva desde archivo CSV/TXT");
    info!("   GET  /api/v1/modelos - Catálogo de modelos");
    info!("   GET  /api/v1/health - Estado del servicio");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db_connection.close().await;

    if let Err(e) = served {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
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
