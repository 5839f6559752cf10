//! Módulo de base de datos
//!
//! Maneja la conexión y el schema de PostgreSQL

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;
pub use schema::setup_database;
