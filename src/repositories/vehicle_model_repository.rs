use crate::models::VehicleModel;
use crate::utils::errors::AppError;
use sqlx::PgConnection;

/// Consultas sobre el catálogo `modelos` (solo lectura)
pub struct VehicleModelRepository;

impl VehicleModelRepository {
    /// Primera entrada del catálogo, usada como modelo por defecto
    pub async fn first_id(conn: &mut PgConnection) -> Result<Option<i32>, AppError> {
        let id = sqlx::query_scalar::<_, Option<i32>>("SELECT MIN(id) FROM modelos")
            .fetch_one(conn)
            .await?;

        Ok(id)
    }

    pub async fn list(conn: &mut PgConnection) -> Result<Vec<VehicleModel>, AppError> {
        let models = sqlx::query_as::<_, VehicleModel>(
            "SELECT id, nombre, categoria FROM modelos ORDER BY id"
        )
        .fetch_all(conn)
        .await?;

        Ok(models)
    }
}
