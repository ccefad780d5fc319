//! Product catalog persistence, bulk import and spreadsheet export.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod logging;
pub mod observability;

#[cfg(test)]
mod test;

mod ids;

pub use ids::TypedId;
