//! Recepción de archivos subidos
//!
//! Acepta un único archivo en el campo `file` de un formulario multipart, lo
//! filtra por tipo y tamaño y lo guarda en el directorio de cargas. El archivo
//! temporal se borra cuando se suelta el `UploadedFile`, haya o no error.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Nombre del campo multipart que trae el archivo
pub const FILE_FIELD: &str = "file";

const ALLOWED_MIME_TYPES: [&str; 3] = ["text/csv", "text/plain", "application/csv"];
const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

lazy_static! {
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9.-]").unwrap();
}

/// Reglas de recepción de archivos
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub dir: PathBuf,
    pub max_file_size: usize,
}

impl UploadPolicy {
    pub fn new(dir: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            dir: dir.into(),
            max_file_size,
        }
    }

    fn too_large_message(&self) -> String {
        const KIB: usize = 1024;
        const MIB: usize = 1024 * 1024;

        let limit = if self.max_file_size < MIB {
            format!("{}KB", (self.max_file_size + KIB - 1) / KIB)
        } else {
            format!("{}MB", (self.max_file_size + MIB - 1) / MIB)
        };
        format!("El archivo es demasiado grande. Máximo {}.", limit)
    }
}

/// Archivo guardado en el directorio de cargas
#[derive(Debug)]
pub struct UploadedFile {
    path: TempPath,
    original_name: String,
    size: usize,
}

impl UploadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Borra el archivo del disco
    pub fn remove(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => debug!("🗑️ Archivo temporal {} eliminado", shown),
            Err(e) => warn!("⚠️ No se pudo eliminar {}: {}", shown, e),
        }
    }
}

/// Reemplaza todo carácter fuera de `[a-zA-Z0-9.-]` por `_`
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(name, "_").into_owned()
}

/// Tipo aceptado si el MIME o la extensión corresponden a CSV/TXT
pub fn is_allowed_file(file_name: &str, content_type: Option<&str>) -> bool {
    let mime_ok = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .map_or(false, |essence| ALLOWED_MIME_TYPES.contains(&essence.as_str()));

    let extension_ok = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        });

    mime_ok || extension_ok
}

/// Lee el formulario y guarda el único archivo permitido
pub async fn receive_single_file(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> AppResult<UploadedFile> {
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("📝 Campo de texto {:?} ignorado", field.name());
            continue;
        };

        if field.name() != Some(FILE_FIELD) {
            return Err(bad_request_error("Campo de archivo no esperado."));
        }
        if uploaded.is_some() {
            return Err(bad_request_error("Demasiados archivos. Solo se permite uno."));
        }
        if !is_allowed_file(&file_name, field.content_type()) {
            return Err(bad_request_error("Solo se permiten archivos CSV o TXT"));
        }

        uploaded = Some(store_field(field, file_name, policy).await?);
    }

    let file = uploaded.ok_or_else(|| bad_request_error("No se proporcionó ningún archivo"))?;
    info!(
        "📁 Archivo recibido: {} ({} bytes)",
        file.original_name(),
        file.size()
    );
    Ok(file)
}

async fn store_field(
    mut field: Field<'_>,
    original_name: String,
    policy: &UploadPolicy,
) -> AppResult<UploadedFile> {
    tokio::fs::create_dir_all(&policy.dir).await?;

    let prefix = format!("{}_", chrono::Utc::now().timestamp_millis());
    let suffix = format!("_{}", sanitize_file_name(&original_name));
    let named = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .rand_bytes(6)
        .tempfile_in(&policy.dir)?;

    let (file, path) = named.into_parts();
    let mut uploaded = UploadedFile {
        path,
        original_name,
        size: 0,
    };
    let mut file = tokio::fs::File::from_std(file);

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        uploaded.size += chunk.len();
        if uploaded.size > policy.max_file_size {
            return Err(AppError::BadRequest(policy.too_large_message()));
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(uploaded)
}

fn multipart_error(e: MultipartError) -> AppError {
    warn!("⚠️ Formulario multipart inválido: {}", e);
    AppError::BadRequest(e.body_text())
}
