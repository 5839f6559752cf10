//! Objetos de transferencia de la API

pub mod api_response;
pub mod batch_dto;
pub mod sale_dto;

pub use api_response::ApiResponse;
pub use batch_dto::{BatchSummary, RowDetail, RowFailure, RowSuccess, SaleRow};
pub use sale_dto::{CreateSaleRequest, CreatedSale};
