//! Product Records
//!
//! Conversion between `products` rows and the [`Product`] model. Nullable
//! columns decode to `None` only when the column is NULL; an empty string
//! read back from storage is kept as `Some("")`. On the write path empty
//! strings are normalized to NULL.

use jiff::Timestamp;
use sqlx::{FromRow, Row, sqlite::SqliteRow};

use crate::domain::products::models::{NewProduct, Product, ProductId};

/// Row as stored in the `products` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            stock: row.try_get("stock")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = sqlx::Error;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let stock = u32::try_from(record.stock).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::from_i64(record.id),
            name: record.name,
            price: record.price,
            category: record.category,
            stock,
            description: record.description,
            image_url: record.image_url,
            created_at: parse_timestamp("created_at", &record.created_at)?,
            updated_at: record
                .updated_at
                .as_deref()
                .map(|value| parse_timestamp("updated_at", value))
                .transpose()?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        ProductRecord::from_row(row)?.try_into()
    }
}

/// Parse a timestamp column written by SQLite as RFC 3339 UTC text.
pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<Timestamp, sqlx::Error> {
    value
        .parse::<Timestamp>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// Write-side mapping for one optional text column: `""` means absent.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Insert parameters for a new product, with optional fields normalized.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductParams {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<NewProduct> for ProductParams {
    fn from(product: NewProduct) -> Self {
        Self {
            name: product.name,
            price: product.price,
            category: normalize_optional(product.category),
            stock: i64::from(product.stock),
            description: normalize_optional(product.description),
            image_url: normalize_optional(product.image_url),
        }
    }
}
