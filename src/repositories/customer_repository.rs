use crate::models::NewCustomer;
use crate::utils::errors::AppError;
use sqlx::PgConnection;

/// Consultas sobre la tabla `clientes`
pub struct CustomerRepository;

impl CustomerRepository {
    pub async fn find_id_by_document(
        conn: &mut PgConnection,
        document: &str,
    ) -> Result<Option<i32>, AppError> {
        let id = sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE documento = $1")
            .bind(document)
            .fetch_optional(conn)
            .await?;

        Ok(id)
    }

    pub async fn create(conn: &mut PgConnection, customer: &NewCustomer) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO clientes (documento, nombres, apellidos, email, direccion, fecha_nacimiento, genero, celular)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#
        )
        .bind(&customer.document)
        .bind(&customer.first_names)
        .bind(&customer.last_names)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.birth_date)
        .bind(&customer.gender)
        .bind(&customer.phone)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }
}
