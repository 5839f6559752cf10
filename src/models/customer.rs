//! Modelo de Cliente
//!
//! Mapea a la tabla `clientes`. El documento es la llave natural: como máximo
//! una fila por documento.

use chrono::NaiveDate;
use serde::Serialize;

/// Datos para insertar un cliente nuevo (ya normalizados)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCustomer {
    pub document: String,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: String,
}
