//! Registro de una venta individual
//!
//! Misma escritura que el lote (cliente, vehículo, venta) para un solo
//! registro validado, en una transacción propia.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{CreateSaleRequest, CreatedSale};
use crate::models::{NewCustomer, NewSale, NewVehicle};
use crate::repositories::SalesStore;
use crate::services::row_processor::{persist_sale_record, SaleRecord};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{non_blank, validate_date};

pub struct SaleService {
    store: Arc<dyn SalesStore>,
}

impl SaleService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self { store }
    }

    pub async fn create_sale(
        &self,
        request: CreateSaleRequest,
        today: NaiveDate,
    ) -> AppResult<CreatedSale> {
        let record = to_sale_record(request, today)?;

        let mut tx = self.store.begin().await?;
        match persist_sale_record(tx.as_mut(), &record).await {
            Ok(persisted) => {
                tx.commit().await?;
                info!(
                    "✅ Venta {} registrada (factura {})",
                    persisted.venta_id, record.sale.invoice_number
                );
                Ok(CreatedSale {
                    venta_id: persisted.venta_id,
                    cliente_id: persisted.cliente_id,
                    vehiculo_id: persisted.vehiculo_id,
                })
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("⚠️ No se pudo revertir la venta: {}", rollback_error);
                }
                Err(e)
            }
        }
    }
}

/// Valida la solicitud y la convierte en registros para insertar
pub fn to_sale_record(request: CreateSaleRequest, today: NaiveDate) -> AppResult<SaleRecord> {
    request.validate()?;

    if request.anio_modelo > today.year() + 1 {
        return Err(validation_error(
            "anio_modelo",
            "Año de modelo no puede ser futuro",
        ));
    }

    let price = Decimal::from_f64(request.precio)
        .map(|p| p.round_dp(2))
        .ok_or_else(|| validation_error("precio", "Precio no es un número válido"))?;

    let birth_date = match request.fecha_nacimiento.as_deref().and_then(non_blank) {
        Some(value) => Some(iso_date("fecha_nacimiento", value)?),
        None => None,
    };

    let customer = NewCustomer {
        document: request.documento.trim().to_string(),
        first_names: request.nombres.trim().to_string(),
        last_names: request.apellidos.trim().to_string(),
        email: request.email.trim().to_string(),
        address: request.direccion.as_deref().and_then(non_blank).map(str::to_string),
        birth_date,
        gender: request.genero.as_deref().and_then(non_blank).map(str::to_string),
        phone: request.celular.trim().to_string(),
    };

    let vehicle = NewVehicle {
        model_id: request.modelo_id,
        engine_number: request.motor.trim().to_string(),
        displacement: request.cilindraje,
        color: request.color.trim().to_string(),
        assembly_date: iso_date("fecha_ensamble", &request.fecha_ensamble)?,
        model_year: request.anio_modelo,
    };

    let sale = NewSale {
        date: iso_date("fecha", &request.fecha)?,
        invoice_number: request.factura_num.trim().to_string(),
        city: request.ciudad.trim().to_string(),
        store: request.tienda.trim().to_string(),
        price,
        seller: request.vendedor.trim().to_string(),
    };

    Ok(SaleRecord {
        customer,
        vehicle,
        sale,
    })
}

fn iso_date(field: &'static str, value: &str) -> AppResult<NaiveDate> {
    validate_date(value)
        .map_err(|_| validation_error(field, "Fecha debe tener formato ISO (YYYY-MM-DD)"))
}
