use crate::models::NewSale;
use crate::utils::errors::AppError;
use sqlx::PgConnection;

/// Consultas sobre la tabla `ventas`
pub struct SaleRepository;

impl SaleRepository {
    pub async fn create(
        conn: &mut PgConnection,
        sale: &NewSale,
        customer_id: i32,
        vehicle_id: i32,
    ) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO ventas (fecha, factura_num, ciudad, tienda, precio, cliente_id, vehiculo_id, vendedor)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#
        )
        .bind(sale.date)
        .bind(&sale.invoice_number)
        .bind(&sale.city)
        .bind(&sale.store)
        .bind(sale.price)
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(&sale.seller)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }
}
