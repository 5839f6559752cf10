//! Acceso transaccional a la base de ventas
//!
//! `SalesStore` es el punto de inyección entre los servicios y la base de
//! datos: el servicio pide una transacción y ejecuta sobre ella las cuatro
//! sentencias del registro de una venta. La implementación de producción
//! envuelve un `PgPool`; las pruebas usan una implementación en memoria.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use crate::models::{NewCustomer, NewSale, NewVehicle, VehicleModel};
use crate::repositories::{
    CustomerRepository, SaleRepository, VehicleModelRepository, VehicleRepository,
};
use crate::utils::errors::{internal_error, AppResult};

/// Nombre del savepoint que aísla cada fila de un lote
const ROW_SAVEPOINT: &str = "venta_row";

/// Fuente de transacciones sobre el schema de ventas
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Abre una transacción en una conexión propia del pool
    async fn begin(&self) -> AppResult<Box<dyn SalesTransaction>>;

    /// Lista el catálogo de modelos
    async fn list_models(&self) -> AppResult<Vec<VehicleModel>>;

    /// Comprueba que la base responde
    async fn ping(&self) -> AppResult<()>;
}

/// Transacción abierta sobre el schema de ventas.
///
/// Tras `commit` o `rollback` la transacción queda cerrada y cualquier otra
/// llamada devuelve un error interno.
#[async_trait]
pub trait SalesTransaction: Send {
    async fn first_model_id(&mut self) -> AppResult<Option<i32>>;

    async fn find_customer_id(&mut self, document: &str) -> AppResult<Option<i32>>;

    async fn insert_customer(&mut self, customer: &NewCustomer) -> AppResult<i32>;

    async fn insert_vehicle(&mut self, vehicle: &NewVehicle) -> AppResult<i32>;

    async fn insert_sale(
        &mut self,
        sale: &NewSale,
        customer_id: i32,
        vehicle_id: i32,
    ) -> AppResult<i32>;

    /// Marca el inicio de una fila
    async fn savepoint(&mut self) -> AppResult<()>;

    /// Confirma las escrituras de la fila dentro de la transacción
    async fn release_savepoint(&mut self) -> AppResult<()>;

    /// Deshace solo las escrituras de la fila en curso y cierra su savepoint
    async fn rollback_to_savepoint(&mut self) -> AppResult<()>;

    async fn commit(&mut self) -> AppResult<()>;

    async fn rollback(&mut self) -> AppResult<()>;
}

/// Implementación PostgreSQL
#[derive(Clone)]
pub struct PgSalesStore {
    pool: PgPool,
}

impl PgSalesStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesStore for PgSalesStore {
    async fn begin(&self) -> AppResult<Box<dyn SalesTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSalesTransaction { tx: Some(tx) }))
    }

    async fn list_models(&self) -> AppResult<Vec<VehicleModel>> {
        let mut conn = self.pool.acquire().await?;
        VehicleModelRepository::list(&mut *conn).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Transacción PostgreSQL; los savepoints son sentencias SQL explícitas
/// sobre la misma conexión.
pub struct PgSalesTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSalesTransaction {
    fn conn(&mut self) -> AppResult<&mut PgConnection> {
        match self.tx.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(internal_error("La transacción ya fue cerrada")),
        }
    }

    async fn execute(&mut self, sql: &str) -> AppResult<()> {
        let conn = self.conn()?;
        sqlx::query(sql).execute(conn).await?;
        Ok(())
    }
}

#[async_trait]
impl SalesTransaction for PgSalesTransaction {
    async fn first_model_id(&mut self) -> AppResult<Option<i32>> {
        VehicleModelRepository::first_id(self.conn()?).await
    }

    async fn find_customer_id(&mut self, document: &str) -> AppResult<Option<i32>> {
        CustomerRepository::find_id_by_document(self.conn()?, document).await
    }

    async fn insert_customer(&mut self, customer: &NewCustomer) -> AppResult<i32> {
        CustomerRepository::create(self.conn()?, customer).await
    }

    async fn insert_vehicle(&mut self, vehicle: &NewVehicle) -> AppResult<i32> {
        VehicleRepository::create(self.conn()?, vehicle).await
    }

    async fn insert_sale(
        &mut self,
        sale: &NewSale,
        customer_id: i32,
        vehicle_id: i32,
    ) -> AppResult<i32> {
        SaleRepository::create(self.conn()?, sale, customer_id, vehicle_id).await
    }

    async fn savepoint(&mut self) -> AppResult<()> {
        self.execute(&format!("SAVEPOINT {}", ROW_SAVEPOINT)).await
    }

    async fn release_savepoint(&mut self) -> AppResult<()> {
        self.execute(&format!("RELEASE SAVEPOINT {}", ROW_SAVEPOINT)).await
    }

    async fn rollback_to_savepoint(&mut self) -> AppResult<()> {
        // ROLLBACK TO deja el savepoint abierto; se libera para no anidar filas
        self.execute(&format!("ROLLBACK TO SAVEPOINT {}", ROW_SAVEPOINT))
            .await?;
        self.execute(&format!("RELEASE SAVEPOINT {}", ROW_SAVEPOINT)).await
    }

    async fn commit(&mut self) -> AppResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| internal_error("La transacción ya fue cerrada"))?;
        tx.commit().await?;
        debug!("💾 Transacción confirmada");
        Ok(())
    }

    async fn rollback(&mut self) -> AppResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| internal_error("La transacción ya fue cerrada"))?;
        tx.rollback().await?;
        debug!("↩️ Transacción revertida");
        Ok(())
    }
}
