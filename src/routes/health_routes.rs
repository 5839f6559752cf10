use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::controllers::SaleController;
use crate::dto::ApiResponse;
use crate::models::VehicleModel;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/modelos", get(list_models))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let controller = SaleController::new(state.store.clone());
    let database = if controller.database_is_up().await {
        "up"
    } else {
        "down"
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleModel>>>, AppError> {
    let controller = SaleController::new(state.store.clone());
    let response = controller.list_models().await?;
    Ok(Json(response))
}
