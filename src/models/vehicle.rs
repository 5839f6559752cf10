//! Modelo de Vehículo
//!
//! Mapea a la tabla `vehiculos`. No hay restricción de unicidad sobre el
//! número de motor: cada venta crea su propio vehículo.

use chrono::NaiveDate;
use serde::Serialize;

/// Datos para insertar un vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVehicle {
    pub model_id: i32,
    pub engine_number: String,
    pub displacement: i32,
    pub color: String,
    pub assembly_date: NaiveDate,
    pub model_year: i32,
}
