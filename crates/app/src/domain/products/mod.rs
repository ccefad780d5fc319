//! Products

pub mod errors;
pub mod models;
pub mod pagination;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
