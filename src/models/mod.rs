//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! de ventas: clientes, catálogo de modelos, vehículos y ventas.

pub mod customer;
pub mod sale;
pub mod vehicle;
pub mod vehicle_model;

pub use customer::NewCustomer;
pub use sale::{NewSale, PersistedSale};
pub use vehicle::NewVehicle;
pub use vehicle_model::VehicleModel;
