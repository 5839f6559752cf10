//! Procesamiento de una fila de venta
//!
//! Una fila pasa por dos fases:
//! 1. `build_sale_record`: verifica los campos requeridos y convierte la fila
//!    cruda en registros listos para insertar (sin tocar la base).
//! 2. `persist_sale_record`: busca o crea el cliente, inserta el vehículo y
//!    luego la venta, en ese orden, cortando en el primer fallo.

use thiserror::Error;
use tracing::debug;

use crate::dto::SaleRow;
use crate::models::{NewCustomer, NewSale, NewVehicle, PersistedSale};
use crate::repositories::SalesTransaction;
use crate::services::default_policy::{parse_decimal, DefaultPolicy, DefaultedField, InvalidDate};
use crate::utils::errors::AppResult;
use crate::utils::validation::non_blank;

/// Motivo de rechazo de una fila antes de escribir en la base
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Campos requeridos faltantes: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    #[error("Fecha inválida en el campo {field}: '{value}'")]
    InvalidDate { field: &'static str, value: String },
}

impl From<InvalidDate> for RowError {
    fn from(e: InvalidDate) -> Self {
        RowError::InvalidDate {
            field: e.field,
            value: e.value,
        }
    }
}

/// Registros derivados de una fila
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub customer: NewCustomer,
    pub vehicle: NewVehicle,
    pub sale: NewSale,
}

/// Verifica los campos requeridos de una fila.
///
/// Documento, nombres, número de factura y precio deben venir con contenido;
/// el precio además debe ser numérico.
pub fn check_required_fields(row: &SaleRow) -> Result<(), RowError> {
    let mut missing = Vec::new();

    if non_blank(&row.documento).is_none() {
        missing.push("documento");
    }
    if non_blank(&row.nombres).is_none() {
        missing.push("nombres");
    }
    if non_blank(&row.factura_num).is_none() {
        missing.push("factura_num");
    }
    if non_blank(&row.precio).and_then(parse_decimal).is_none() {
        missing.push("precio");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RowError::MissingRequiredFields(missing))
    }
}

/// Convierte una fila cruda en registros para insertar
pub fn build_sale_record(row: &SaleRow, policy: &DefaultPolicy) -> Result<SaleRecord, RowError> {
    check_required_fields(row)?;

    let customer = NewCustomer {
        document: row.documento.trim().to_string(),
        first_names: row.nombres.trim().to_string(),
        last_names: row.apellidos.trim().to_string(),
        email: row.email.trim().to_string(),
        address: non_blank(&row.direccion).map(str::to_string),
        birth_date: policy.optional_date(DefaultedField::FechaNacimiento, &row.fecha_nacimiento)?,
        gender: policy.optional_text(DefaultedField::Genero, &row.genero),
        phone: row.celular.trim().to_string(),
    };

    let vehicle = NewVehicle {
        model_id: policy.integer(DefaultedField::ModeloId, &row.modelo_id),
        engine_number: row.motor.trim().to_string(),
        displacement: policy.integer(DefaultedField::Cilindraje, &row.cilindraje),
        color: policy.text(DefaultedField::Color, &row.color),
        assembly_date: policy.date(DefaultedField::FechaEnsamble, &row.fecha_ensamble)?,
        model_year: policy.integer(DefaultedField::AnioModelo, &row.anio_modelo),
    };

    let sale = NewSale {
        date: policy.date(DefaultedField::Fecha, &row.fecha)?,
        invoice_number: row.factura_num.trim().to_string(),
        city: policy.text(DefaultedField::Ciudad, &row.ciudad),
        store: policy.text(DefaultedField::Tienda, &row.tienda),
        price: policy.decimal(DefaultedField::Precio, &row.precio),
        seller: policy.text(DefaultedField::Vendedor, &row.vendedor),
    };

    Ok(SaleRecord {
        customer,
        vehicle,
        sale,
    })
}

/// Escribe cliente (si no existe), vehículo y venta
pub async fn persist_sale_record(
    tx: &mut dyn SalesTransaction,
    record: &SaleRecord,
) -> AppResult<PersistedSale> {
    let (cliente_id, customer_created) =
        match tx.find_customer_id(&record.customer.document).await? {
            Some(id) => {
                debug!("👤 Cliente {} reutilizado (id {})", record.customer.document, id);
                (id, false)
            }
            None => {
                let id = tx.insert_customer(&record.customer).await?;
                debug!("🆕 Cliente {} creado (id {})", record.customer.document, id);
                (id, true)
            }
        };

    let vehiculo_id = tx.insert_vehicle(&record.vehicle).await?;
    let venta_id = tx.insert_sale(&record.sale, cliente_id, vehiculo_id).await?;

    Ok(PersistedSale {
        venta_id,
        cliente_id,
        vehiculo_id,
        customer_created,
    })
}
