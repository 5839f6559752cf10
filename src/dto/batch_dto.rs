use serde::{Deserialize, Serialize};

/// Fila cruda del archivo plano, con los nombres de columna fijos.
///
/// Se conserva sin normalizar para devolverla en el detalle de error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    pub documento: String,
    pub nombres: String,
    pub apellidos: String,
    pub email: String,
    pub direccion: String,
    pub fecha_nacimiento: String,
    pub genero: String,
    pub celular: String,
    pub motor: String,
    pub modelo_id: String,
    pub cilindraje: String,
    pub color: String,
    pub fecha_ensamble: String,
    pub anio_modelo: String,
    pub factura_num: String,
    pub precio: String,
    pub fecha: String,
    pub ciudad: String,
    pub tienda: String,
    pub vendedor: String,
}

// Detalle de una fila registrada
#[derive(Debug, Clone, Serialize)]
pub struct RowSuccess {
    pub row: u64,
    pub success: bool,
    pub venta_id: i32,
    pub factura_num: String,
}

// Detalle de una fila rechazada
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub row: u64,
    pub success: bool,
    pub error: String,
    pub data: SaleRow,
}

/// Resultado por fila, en el orden del archivo
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RowDetail {
    Success(RowSuccess),
    Error(RowFailure),
}

impl RowDetail {
    pub fn row(&self) -> u64 {
        match self {
            RowDetail::Success(s) => s.row,
            RowDetail::Error(e) => e.row,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowDetail::Success(_))
    }
}

/// Resumen agregado de un lote
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub errors: usize,
    pub total: usize,
    pub details: Vec<RowDetail>,
}

impl BatchSummary {
    pub fn record_success(&mut self, row: u64, venta_id: i32, factura_num: String) {
        self.processed += 1;
        self.total += 1;
        self.details.push(RowDetail::Success(RowSuccess {
            row,
            success: true,
            venta_id,
            factura_num,
        }));
    }

    pub fn record_error(&mut self, row: u64, error: String, data: SaleRow) {
        self.errors += 1;
        self.total += 1;
        self.details.push(RowDetail::Error(RowFailure {
            row,
            success: false,
            error,
            data,
        }));
    }

    pub fn message(&self) -> String {
        format!(
            "Procesamiento completado. {} ventas creadas, {} errores.",
            self.processed, self.errors
        )
    }
}
