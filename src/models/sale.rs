//! Modelo de Venta
//!
//! Mapea a la tabla `ventas`. `factura_num` es único en toda la tabla.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Datos para insertar una venta; las llaves de cliente y vehículo se
/// resuelven al persistir.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    pub date: NaiveDate,
    pub invoice_number: String,
    pub city: String,
    pub store: String,
    pub price: Decimal,
    pub seller: String,
}

/// Identificadores generados al registrar una venta completa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersistedSale {
    pub venta_id: i32,
    pub cliente_id: i32,
    pub vehiculo_id: i32,
    #[serde(skip)]
    pub customer_created: bool,
}
