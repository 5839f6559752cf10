//! Registro de ventas de vehículos
//!
//! Backend HTTP que registra ventas (cliente, vehículo y venta) una a una o
//! por lotes desde un archivo plano.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
