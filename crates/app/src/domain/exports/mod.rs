//! Spreadsheet export and import templates

pub mod errors;
pub mod service;

pub use errors::ExportError;
pub use service::*;
