//! Middleware del sistema
//!
//! CORS y recepción de archivos subidos.

pub mod cors;
pub mod upload;

pub use cors::*;
pub use upload::{receive_single_file, UploadPolicy, UploadedFile};
