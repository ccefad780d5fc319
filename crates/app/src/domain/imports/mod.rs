//! Bulk product import

pub mod errors;
pub mod models;
pub mod parse;
pub mod service;
pub mod validate;

pub use errors::ImportError;
pub use service::*;
