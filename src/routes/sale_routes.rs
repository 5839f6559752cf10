use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Multipart,
        State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::controllers::SaleController;
use crate::dto::{ApiResponse, BatchSummary, CreateSaleRequest, CreatedSale};
use crate::middleware::upload::receive_single_file;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Margen para los encabezados y delimitadores del formulario multipart
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_sale_router(max_file_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(create_sale))
        .route(
            "/batch",
            post(process_batch)
                .layer(DefaultBodyLimit::max(max_file_size + MULTIPART_OVERHEAD)),
        )
}

async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedSale>>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let controller = SaleController::new(state.store.clone());
    let response = controller.create(request, today()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn process_batch(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<BatchSummary>>, AppError> {
    let mut multipart =
        multipart.map_err(|_| bad_request_error("No se proporcionó ningún archivo"))?;
    let upload = receive_single_file(&mut multipart, &state.config.upload_policy()).await?;

    let controller = SaleController::new(state.store.clone());
    let response = controller.process_batch(upload, today()).await?;
    Ok(Json(response))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
