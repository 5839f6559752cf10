//! Servicios de negocio
//!
//! Lectura del archivo plano, valores por defecto, procesamiento por fila y
//! los dos caminos de escritura: lote y venta individual.

pub mod batch_import_service;
pub mod default_policy;
pub mod row_parser;
pub mod row_processor;
pub mod sale_service;

pub use batch_import_service::BatchImportService;
pub use sale_service::SaleService;
