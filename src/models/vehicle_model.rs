//! Catálogo de modelos
//!
//! Tabla de referencia `modelos`, sembrada una sola vez al arrancar.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Entrada del catálogo de modelos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VehicleModel {
    pub id: i32,
    pub nombre: String,
    pub categoria: Option<String>,
}

/// Catálogo inicial (nombre, categoría)
pub const SEED_MODELS: [(&str, &str); 4] = [
    ("MT-07", "Naked"),
    ("YZF-R3", "Sport"),
    ("Ténéré 700", "Adventure"),
    ("NMAX", "Scooter"),
];
