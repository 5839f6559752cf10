use crate::models::NewVehicle;
use crate::utils::errors::AppError;
use sqlx::PgConnection;

/// Consultas sobre la tabla `vehiculos`
pub struct VehicleRepository;

impl VehicleRepository {
    pub async fn create(conn: &mut PgConnection, vehicle: &NewVehicle) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO vehiculos (modelo_id, motor, cilindraje, color, fecha_ensamble, anio_modelo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#
        )
        .bind(vehicle.model_id)
        .bind(&vehicle.engine_number)
        .bind(vehicle.displacement)
        .bind(&vehicle.color)
        .bind(vehicle.assembly_date)
        .bind(vehicle.model_year)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }
}
