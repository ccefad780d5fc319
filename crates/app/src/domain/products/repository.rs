//! Products Repository

use jiff::Timestamp;
use sqlx::{Sqlite, SqliteConnection, query, query_as, query_scalar};

use crate::domain::products::{
    models::{NewProduct, Product, ProductId},
    records::{ProductParams, parse_timestamp},
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const GET_UPDATED_AT_SQL: &str = include_str!("sql/get_updated_at.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        conn: &mut SqliteConnection,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let params = ProductParams::from(product);

        let (id, created_at): (i64, String) = query_as(CREATE_PRODUCT_SQL)
            .bind(&params.name)
            .bind(params.price)
            .bind(params.category.as_deref())
            .bind(params.stock)
            .bind(params.description.as_deref())
            .bind(params.image_url.as_deref())
            .fetch_one(&mut *conn)
            .await?;

        let stock = u32::try_from(params.stock).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Product {
            id: ProductId::from_i64(id),
            name: params.name,
            price: params.price,
            category: params.category,
            stock,
            description: params.description,
            image_url: params.image_url,
            created_at: parse_timestamp("created_at", &created_at)?,
            updated_at: None,
        })
    }

    pub(crate) async fn get_product(
        &self,
        conn: &mut SqliteConnection,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        conn: &mut SqliteConnection,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let offset = i64::try_from(offset).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Sqlite, Product>(LIST_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut *conn)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "COUNT(*)".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn update_product(
        &self,
        conn: &mut SqliteConnection,
        product: ProductId,
        name: &str,
        price: f64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(name)
            .bind(price)
            .bind(product.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Reads `updated_at` back as written by the database clock.
    pub(crate) async fn get_updated_at(
        &self,
        conn: &mut SqliteConnection,
        product: ProductId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let updated_at: Option<String> = query_scalar(GET_UPDATED_AT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut *conn)
            .await?;

        updated_at
            .as_deref()
            .map(|value| parse_timestamp("updated_at", value))
            .transpose()
    }

    pub(crate) async fn delete_product(
        &self,
        conn: &mut SqliteConnection,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
