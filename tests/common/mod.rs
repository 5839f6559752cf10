//! Utilidades compartidas por las pruebas de integración
//!
//! `MemorySalesStore` reproduce la semántica transaccional que usa el
//! importador: una copia de trabajo por transacción, una instantánea por
//! savepoint y las restricciones de unicidad y llave foránea del schema.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sales_registry::models::{NewCustomer, NewSale, NewVehicle, VehicleModel};
use sales_registry::repositories::{SalesStore, SalesTransaction};
use sales_registry::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSale {
    pub id: i32,
    pub sale: NewSale,
    pub customer_id: i32,
    pub vehicle_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub customers: Vec<(i32, NewCustomer)>,
    pub vehicles: Vec<(i32, NewVehicle)>,
    pub sales: Vec<StoredSale>,
    pub models: Vec<VehicleModel>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Almacén en memoria con fallos inyectables
#[derive(Clone, Default)]
pub struct MemorySalesStore {
    committed: Arc<Mutex<Tables>>,
    sale_inserts: Arc<AtomicUsize>,
    fail_on_sale_insert: Option<usize>,
    down: bool,
}

impl MemorySalesStore {
    /// Almacén con el catálogo inicial (ids 5..=8)
    pub fn with_catalog() -> Self {
        let store = Self::default();
        {
            let mut tables = store.committed.lock().unwrap();
            for (offset, (nombre, categoria)) in
                sales_registry::models::vehicle_model::SEED_MODELS.iter().enumerate()
            {
                tables.models.push(VehicleModel {
                    id: 5 + offset as i32,
                    nombre: nombre.to_string(),
                    categoria: Some(categoria.to_string()),
                });
            }
            tables.next_id = 100;
        }
        store
    }

    /// La n-ésima inserción de venta (base 1) falla como si se perdiera la conexión
    pub fn failing_on_sale_insert(mut self, n: usize) -> Self {
        self.fail_on_sale_insert = Some(n);
        self
    }

    /// Toda operación falla como si la base no respondiera
    pub fn unavailable(mut self) -> Self {
        self.down = true;
        self
    }

    pub fn snapshot(&self) -> Tables {
        self.committed.lock().unwrap().clone()
    }

    pub fn seed_customer(&self, customer: NewCustomer) -> i32 {
        let mut tables = self.committed.lock().unwrap();
        let id = tables.next_id();
        tables.customers.push((id, customer));
        id
    }

    pub fn seed_sale(&self, invoice_number: &str) -> i32 {
        let mut tables = self.committed.lock().unwrap();
        let customer_id = tables.next_id();
        tables.customers.push((customer_id, customer("9999999")));
        let vehicle_id = tables.next_id();
        tables.vehicles.push((vehicle_id, vehicle(5)));
        let id = tables.next_id();
        tables.sales.push(StoredSale {
            id,
            sale: sale(invoice_number),
            customer_id,
            vehicle_id,
        });
        id
    }
}

#[async_trait]
impl SalesStore for MemorySalesStore {
    async fn begin(&self) -> AppResult<Box<dyn SalesTransaction>> {
        if self.down {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let working = self.committed.lock().unwrap().clone();
        Ok(Box::new(MemoryTransaction {
            committed: self.committed.clone(),
            working: Some(working),
            savepoint: None,
            sale_inserts: self.sale_inserts.clone(),
            fail_on_sale_insert: self.fail_on_sale_insert,
        }))
    }

    async fn list_models(&self) -> AppResult<Vec<VehicleModel>> {
        if self.down {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.committed.lock().unwrap().models.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        if self.down {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

pub struct MemoryTransaction {
    committed: Arc<Mutex<Tables>>,
    working: Option<Tables>,
    savepoint: Option<Tables>,
    sale_inserts: Arc<AtomicUsize>,
    fail_on_sale_insert: Option<usize>,
}

impl MemoryTransaction {
    fn tables(&mut self) -> AppResult<&mut Tables> {
        self.working
            .as_mut()
            .ok_or_else(|| AppError::Internal("La transacción ya fue cerrada".to_string()))
    }
}

#[async_trait]
impl SalesTransaction for MemoryTransaction {
    async fn first_model_id(&mut self) -> AppResult<Option<i32>> {
        Ok(self.tables()?.models.iter().map(|m| m.id).min())
    }

    async fn find_customer_id(&mut self, document: &str) -> AppResult<Option<i32>> {
        Ok(self
            .tables()?
            .customers
            .iter()
            .find(|(_, c)| c.document == document)
            .map(|(id, _)| *id))
    }

    async fn insert_customer(&mut self, customer: &NewCustomer) -> AppResult<i32> {
        let tables = self.tables()?;
        if tables.customers.iter().any(|(_, c)| c.document == customer.document) {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint \"clientes_documento_key\""
                    .to_string(),
            ));
        }
        let id = tables.next_id();
        tables.customers.push((id, customer.clone()));
        Ok(id)
    }

    async fn insert_vehicle(&mut self, vehicle: &NewVehicle) -> AppResult<i32> {
        let tables = self.tables()?;
        if !tables.models.iter().any(|m| m.id == vehicle.model_id) {
            return Err(AppError::BadRequest(
                "insert or update on table \"vehiculos\" violates foreign key constraint \"vehiculos_modelo_id_fkey\""
                    .to_string(),
            ));
        }
        let id = tables.next_id();
        tables.vehicles.push((id, vehicle.clone()));
        Ok(id)
    }

    async fn insert_sale(
        &mut self,
        sale: &NewSale,
        customer_id: i32,
        vehicle_id: i32,
    ) -> AppResult<i32> {
        let attempt = self.sale_inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_sale_insert == Some(attempt) {
            return Err(AppError::ServiceUnavailable(
                "conexión con la base de datos perdida".to_string(),
            ));
        }

        let tables = self.tables()?;
        if tables
            .sales
            .iter()
            .any(|s| s.sale.invoice_number == sale.invoice_number)
        {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint \"ventas_factura_num_key\""
                    .to_string(),
            ));
        }
        let id = tables.next_id();
        tables.sales.push(StoredSale {
            id,
            sale: sale.clone(),
            customer_id,
            vehicle_id,
        });
        Ok(id)
    }

    async fn savepoint(&mut self) -> AppResult<()> {
        let snapshot = self.tables()?.clone();
        self.savepoint = Some(snapshot);
        Ok(())
    }

    async fn release_savepoint(&mut self) -> AppResult<()> {
        self.savepoint
            .take()
            .map(|_| ())
            .ok_or_else(|| AppError::Internal("savepoint inexistente".to_string()))
    }

    async fn rollback_to_savepoint(&mut self) -> AppResult<()> {
        let snapshot = self
            .savepoint
            .take()
            .ok_or_else(|| AppError::Internal("savepoint inexistente".to_string()))?;
        self.working = Some(snapshot);
        Ok(())
    }

    async fn commit(&mut self) -> AppResult<()> {
        let working = self
            .working
            .take()
            .ok_or_else(|| AppError::Internal("La transacción ya fue cerrada".to_string()))?;
        *self.committed.lock().unwrap() = working;
        Ok(())
    }

    async fn rollback(&mut self) -> AppResult<()> {
        self.working
            .take()
            .map(|_| ())
            .ok_or_else(|| AppError::Internal("La transacción ya fue cerrada".to_string()))
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn customer(document: &str) -> NewCustomer {
    NewCustomer {
        document: document.to_string(),
        first_names: "Cliente".to_string(),
        last_names: "Existente".to_string(),
        email: "cliente@example.com".to_string(),
        address: None,
        birth_date: None,
        gender: None,
        phone: "3000000000".to_string(),
    }
}

pub fn vehicle(model_id: i32) -> NewVehicle {
    NewVehicle {
        model_id,
        engine_number: "MTR-SEED".to_string(),
        displacement: 689,
        color: "Negro".to_string(),
        assembly_date: today(),
        model_year: 2024,
    }
}

pub fn sale(invoice_number: &str) -> NewSale {
    NewSale {
        date: today(),
        invoice_number: invoice_number.to_string(),
        city: "Bogotá".to_string(),
        store: "Norte".to_string(),
        price: rust_decimal::Decimal::new(3_000_000, 0),
        seller: "Vendedor".to_string(),
    }
}

/// Línea de archivo plano con los 20 campos en orden
pub fn sale_line(documento: &str, nombres: &str, factura: &str, precio: &str) -> String {
    [
        documento,
        nombres,
        "Pérez",
        "cliente@example.com",
        "Calle 1 # 2-3",
        "1990-05-17",
        "M",
        "3001234567",
        "MTR-1001",
        "6",
        "689",
        "Azul",
        "2024-01-10",
        "2024",
        factura,
        precio,
        "2024-02-01",
        "Medellín",
        "Centro",
        "Carlos",
    ]
    .join(",")
}

/// Reemplaza el campo en la posición dada de una línea
pub fn with_field(line: &str, index: usize, value: &str) -> String {
    let mut fields: Vec<&str> = line.split(',').collect();
    fields[index] = value;
    fields.join(",")
}
