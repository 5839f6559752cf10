//! Creación del schema de ventas
//!
//! Crea las tablas si no existen y siembra el catálogo de modelos cuando
//! está vacío, todo en una sola transacción.

use sqlx::PgPool;
use tracing::info;

use crate::models::vehicle_model::SEED_MODELS;

const CREATE_CLIENTES: &str = r#"
    CREATE TABLE IF NOT EXISTS clientes (
        id SERIAL PRIMARY KEY,
        documento VARCHAR(20) UNIQUE NOT NULL,
        nombres VARCHAR(100) NOT NULL,
        apellidos VARCHAR(100) NOT NULL,
        direccion TEXT,
        fecha_nacimiento DATE,
        genero VARCHAR(10),
        celular VARCHAR(20) NOT NULL,
        email VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_MODELOS: &str = r#"
    CREATE TABLE IF NOT EXISTS modelos (
        id SERIAL PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL,
        categoria VARCHAR(50),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_VEHICULOS: &str = r#"
    CREATE TABLE IF NOT EXISTS vehiculos (
        id SERIAL PRIMARY KEY,
        modelo_id INTEGER REFERENCES modelos(id),
        motor VARCHAR(50) NOT NULL,
        cilindraje INTEGER NOT NULL,
        color VARCHAR(50) NOT NULL,
        fecha_ensamble DATE NOT NULL,
        anio_modelo INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_VENTAS: &str = r#"
    CREATE TABLE IF NOT EXISTS ventas (
        id SERIAL PRIMARY KEY,
        fecha DATE NOT NULL,
        factura_num VARCHAR(50) UNIQUE NOT NULL,
        ciudad VARCHAR(100) NOT NULL,
        tienda VARCHAR(100) NOT NULL,
        precio DECIMAL(12,2) NOT NULL,
        cliente_id INTEGER REFERENCES clientes(id),
        vehiculo_id INTEGER REFERENCES vehiculos(id),
        vendedor VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Verifica o crea las tablas y siembra el catálogo
pub async fn setup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for statement in [CREATE_CLIENTES, CREATE_MODELOS, CREATE_VEHICULOS, CREATE_VENTAS] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    let models: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modelos")
        .fetch_one(&mut *tx)
        .await?;

    if models == 0 {
        for (nombre, categoria) in SEED_MODELS {
            sqlx::query("INSERT INTO modelos (nombre, categoria) VALUES ($1, $2)")
                .bind(nombre)
                .bind(categoria)
                .execute(&mut *tx)
                .await?;
        }
        info!("🌱 Catálogo de modelos sembrado ({} modelos)", SEED_MODELS.len());
    }

    tx.commit().await?;
    info!("✅ Tablas de la base de datos verificadas/creadas");
    Ok(())
}
