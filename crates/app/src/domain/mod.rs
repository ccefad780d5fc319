//! Catalog Domain Concerns

pub mod exports;
pub mod imports;
pub mod products;
pub mod spreadsheets;
