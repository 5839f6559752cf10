//! Repositorios
//!
//! Consultas SQL por tabla y el acceso transaccional que las combina.

pub mod customer_repository;
pub mod sale_repository;
pub mod sales_store;
pub mod vehicle_model_repository;
pub mod vehicle_repository;

pub use customer_repository::CustomerRepository;
pub use sale_repository::SaleRepository;
pub use sales_store::{PgSalesStore, SalesStore, SalesTransaction};
pub use vehicle_model_repository::VehicleModelRepository;
pub use vehicle_repository::VehicleRepository;
