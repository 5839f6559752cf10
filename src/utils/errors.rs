//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// SQLSTATE de Postgres para violación de unicidad
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE de Postgres para violación de llave foránea
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Indica si el error invalida el lote completo.
    ///
    /// Los errores que reporta el motor sobre una sentencia concreta (llaves
    /// duplicadas, llaves foráneas, datos fuera de rango) solo afectan a la
    /// fila en curso. La pérdida de conexión, el agotamiento del pool o los
    /// fallos de E/S dejan la transacción en un estado desconocido.
    pub fn is_fatal(&self) -> bool {
        match self {
            AppError::Database(e) => !matches!(
                e,
                sqlx::Error::Database(_)
                    | sqlx::Error::RowNotFound
                    | sqlx::Error::ColumnDecode { .. }
                    | sqlx::Error::Decode(_)
            ),
            AppError::Validation(_) | AppError::Conflict(_) | AppError::BadRequest(_) => false,
            AppError::Io(_)
            | AppError::ImportFailed(_)
            | AppError::Internal(_)
            | AppError::ServiceUnavailable(_) => true,
        }
    }

    /// Mensaje corto para el detalle por fila de un lote
    pub fn row_message(&self) -> String {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => db.message().to_string(),
            AppError::Conflict(msg) | AppError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Código SQLSTATE si el error viene del motor
    pub fn sql_state(&self) -> Option<String> {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => db.code().map(|c| c.into_owned()),
            _ => None,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, code: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let sql_state = self.sql_state();
        let (status, error_response) = match self {
            AppError::Database(e) => match sql_state.as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    warn!("⚠️ Registro duplicado: {}", e);
                    (
                        StatusCode::CONFLICT,
                        ErrorResponse::new(
                            "Registro duplicado. Ya existe un elemento con estos datos.",
                            "DUPLICATE",
                            Some(json!({ "sql_error": e.to_string() })),
                        ),
                    )
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    warn!("⚠️ Referencia inválida: {}", e);
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::new(
                            "Referencia inválida. El registro relacionado no existe.",
                            "INVALID_REFERENCE",
                            Some(json!({ "sql_error": e.to_string() })),
                        ),
                    )
                }
                _ => {
                    error!("❌ Database error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new(
                            "Error accediendo a la base de datos",
                            "DB_ERROR",
                            Some(json!({ "sql_error": e.to_string() })),
                        ),
                    )
                }
            },

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Error de validación", "VALIDATION_ERROR", Some(json!(e))),
                )
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(msg, "CONFLICT", None))
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, "BAD_REQUEST", None))
            }

            AppError::Io(e) => {
                error!("❌ I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Error interno del servidor",
                        "IO_ERROR",
                        Some(json!({ "io_error": e.to_string() })),
                    ),
                )
            }

            AppError::ImportFailed(msg) => {
                error!("❌ Import failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Error al procesar el archivo",
                        "IMPORT_FAILED",
                        Some(json!({ "import_error": msg })),
                    ),
                )
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Error interno del servidor",
                        "INTERNAL_ERROR",
                        Some(json!({ "internal_error": msg })),
                    ),
                )
            }

            AppError::ServiceUnavailable(msg) => {
                error!("❌ Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(msg, "SERVICE_UNAVAILABLE", None),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}
