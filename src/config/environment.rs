//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::middleware::upload::UploadPolicy;

/// Tamaño máximo por defecto de un archivo subido (10 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub upload_path: PathBuf,
    pub max_file_size: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3001,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
            upload_path: PathBuf::from("./uploads"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl EnvironmentConfig {
    /// Lee la configuración del entorno; las variables ausentes toman el
    /// valor por defecto y las mal formadas son error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|value| split_origins(&value))
                .unwrap_or(defaults.cors_origins),
            upload_path: env::var("UPLOAD_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_path),
            max_file_size: parse_var("MAX_FILE_SIZE")?.unwrap_or(defaults.max_file_size),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.upload_path.clone(), self.max_file_size)
    }
}

/// Lee una variable numérica opcional
pub(crate) fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} debe ser un número válido (valor: '{}')", name, value)),
        Err(_) => Ok(None),
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
