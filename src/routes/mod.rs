pub mod health_routes;
pub mod sale_routes;

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::dto::ApiResponse;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API bajo `/api/v1`
pub fn create_app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest(
            "/ventas",
            sale_routes::create_sale_router(state.config.max_file_size),
        )
        .merge(health_routes::create_health_router());

    Router::new()
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Ruta no encontrada".to_string())),
    )
}
