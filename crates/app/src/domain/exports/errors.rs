//! Export errors.

use thiserror::Error;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to load products")]
    Products(#[from] ProductsServiceError),

    #[error("failed to write xlsx workbook")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write csv document")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv document")]
    Io(#[from] std::io::Error),
}
