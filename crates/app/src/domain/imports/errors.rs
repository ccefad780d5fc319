//! Product import errors.

use thiserror::Error;

use crate::domain::{products::ProductsServiceError, spreadsheets::Column};

/// Failures that abort a whole import request before any row is persisted.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("payload is not valid base64")]
    Decode(#[from] base64::DecodeError),

    #[error("payload is not a readable spreadsheet")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid xlsx workbook")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("invalid csv document")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet has no header row")]
    EmptyDocument,

    #[error("header row is not valid UTF-8")]
    HeaderEncoding,

    #[error("required column {:?} is missing", .0.header())]
    MissingColumn(Column),
}

/// Field-level problems found in a single import row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("row is not valid UTF-8")]
    InvalidEncoding,

    #[error("name is required")]
    MissingName,

    #[error("price {0:?} is not a number")]
    InvalidPrice(String),

    #[error("price must not be negative")]
    NegativePrice,

    #[error("stock {0:?} is not a non-negative whole number")]
    InvalidStock(String),
}

/// Why a single row was not imported.
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to save product")]
    Persistence(#[from] ProductsServiceError),
}
