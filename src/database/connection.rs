//! Conexión a PostgreSQL
//!
//! Envuelve el pool de conexiones que comparten todas las solicitudes.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Pool de conexiones de la aplicación
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Abre el pool con la configuración dada
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🔌 Conectando a {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        info!(
            "✅ Pool de base de datos listo (máx. {} conexiones)",
            config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Cierra el pool esperando a que se devuelvan las conexiones
    pub async fn close(&self) {
        self.pool.close().await;
        info!("🔒 Pool de base de datos cerrado");
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map_or(0, |p| p + 3)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
