use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::dto::{ApiResponse, BatchSummary, CreateSaleRequest, CreatedSale};
use crate::middleware::upload::UploadedFile;
use crate::models::VehicleModel;
use crate::repositories::SalesStore;
use crate::services::batch_import_service::BatchImportService;
use crate::services::sale_service::SaleService;
use crate::utils::errors::AppError;

pub struct SaleController {
    store: Arc<dyn SalesStore>,
    import_service: BatchImportService,
    sale_service: SaleService,
}

impl SaleController {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self {
            import_service: BatchImportService::new(store.clone()),
            sale_service: SaleService::new(store.clone()),
            store,
        }
    }

    /// Procesa un archivo de ventas; el archivo se borra en cualquier caso
    pub async fn process_batch(
        &self,
        upload: UploadedFile,
        today: NaiveDate,
    ) -> Result<ApiResponse<BatchSummary>, AppError> {
        info!("📦 Procesando archivo {}", upload.original_name());
        let result = self.import_service.import_file(upload.path(), today).await;
        upload.remove();

        match result {
            Ok(summary) => {
                let message = summary.message();
                Ok(ApiResponse::success_with_message(summary, message))
            }
            Err(e) if e.is_fatal() => Err(AppError::ImportFailed(e.to_string())),
            Err(e) => Err(e),
        }
    }

    pub async fn create(
        &self,
        request: CreateSaleRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<CreatedSale>, AppError> {
        let created = self.sale_service.create_sale(request, today).await?;

        Ok(ApiResponse::success_with_message(
            created,
            "Venta registrada exitosamente".to_string(),
        ))
    }

    pub async fn list_models(&self) -> Result<ApiResponse<Vec<VehicleModel>>, AppError> {
        let models = self.store.list_models().await?;
        Ok(ApiResponse::success(models))
    }

    /// `true` si la base responde
    pub async fn database_is_up(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}
