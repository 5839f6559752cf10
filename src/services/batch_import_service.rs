//! Importación por lotes de ventas
//!
//! Todo el archivo se procesa dentro de una transacción. Cada fila corre en
//! su propio savepoint: si falla, solo se deshacen las escrituras de esa fila
//! y el lote continúa. Un error fatal (conexión, savepoint, commit) revierte
//! el lote completo.

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::dto::BatchSummary;
use crate::repositories::{SalesStore, SalesTransaction};
use crate::services::default_policy::DefaultPolicy;
use crate::services::row_parser::SaleRowReader;
use crate::services::row_processor::{build_sale_record, persist_sale_record};
use crate::utils::errors::{internal_error, AppResult};

/// Servicio de importación de archivos planos de ventas
pub struct BatchImportService {
    store: Arc<dyn SalesStore>,
}

impl BatchImportService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self { store }
    }

    /// Importa un archivo ya guardado en disco
    pub async fn import_file(&self, path: &Path, today: NaiveDate) -> AppResult<BatchSummary> {
        let bytes = tokio::fs::read(path).await?;
        let span = info_span!("batch_import", batch_id = %Uuid::new_v4(), file = %path.display());
        self.import(bytes.as_slice(), today).instrument(span).await
    }

    /// Importa las filas de cualquier lector.
    ///
    /// `today` es la fecha de referencia para los valores por defecto.
    pub async fn import<R: Read + Send>(&self, reader: R, today: NaiveDate) -> AppResult<BatchSummary> {
        info!("📥 Iniciando importación de lote");

        let mut tx = self.store.begin().await?;

        match process_rows(tx.as_mut(), SaleRowReader::new(reader), today).await {
            Ok(summary) => {
                tx.commit().await?;
                info!(
                    "✅ Lote confirmado: {} ventas creadas, {} errores, {} filas",
                    summary.processed, summary.errors, summary.total
                );
                Ok(summary)
            }
            Err(e) => {
                error!("❌ Error fatal en el lote, revirtiendo: {}", e);
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("⚠️ No se pudo revertir el lote: {}", rollback_error);
                }
                Err(e)
            }
        }
    }
}

async fn process_rows<R: Read + Send>(
    tx: &mut dyn SalesTransaction,
    mut rows: SaleRowReader<R>,
    today: NaiveDate,
) -> AppResult<BatchSummary> {
    let first_model_id = tx
        .first_model_id()
        .await?
        .ok_or_else(|| internal_error("El catálogo de modelos está vacío"))?;
    let policy = DefaultPolicy::new(today, first_model_id);
    let mut summary = BatchSummary::default();

    for parsed in rows.by_ref() {
        let record = match build_sale_record(&parsed.row, &policy) {
            Ok(record) => record,
            Err(e) => {
                warn!("⚠️ Fila {} rechazada: {}", parsed.line, e);
                summary.record_error(parsed.line, e.to_string(), parsed.row);
                continue;
            }
        };

        tx.savepoint().await?;

        match persist_sale_record(tx, &record).await {
            Ok(persisted) => {
                tx.release_savepoint().await?;
                summary.record_success(
                    parsed.line,
                    persisted.venta_id,
                    record.sale.invoice_number.clone(),
                );
            }
            Err(e) if !e.is_fatal() => {
                tx.rollback_to_savepoint().await?;
                warn!("⚠️ Fila {} no registrada: {}", parsed.line, e);
                summary.record_error(parsed.line, e.row_message(), parsed.row);
            }
            Err(e) => return Err(e),
        }
    }

    if rows.skipped() > 0 {
        info!("⏭️ {} líneas mal formadas descartadas", rows.skipped());
    }

    Ok(summary)
}
