//! Product Models

use std::num::NonZeroU32;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub stock: u32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// New Product Model
///
/// Optional text fields set to an empty string are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub stock: u32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
}

/// Requested page of the product listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    pub page: NonZeroU32,
    pub page_size: NonZeroU32,
}

impl PaginationRequest {
    #[must_use]
    pub const fn new(page: NonZeroU32, page_size: NonZeroU32) -> Self {
        Self { page, page_size }
    }
}

/// One page of products along with the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u32,
    pub page_size: u32,
}
