//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::Level;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, PaginationRequest, Product, ProductId, ProductPage, ProductUpdate},
        pagination::page_window,
        repository::SqliteProductsRepository,
    },
    logging::{self, LogSink},
};

#[derive(Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
    log: Arc<dyn LogSink>,
}

impl std::fmt::Debug for SqliteProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db, log: Arc<dyn LogSink>) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
            log,
        }
    }

    fn report<T>(
        &self,
        result: &Result<T, ProductsServiceError>,
        success: impl FnOnce(&T) -> String,
        failure: &str,
    ) {
        match result {
            Ok(value) => logging::emit(self.log.as_ref(), Level::INFO, &success(value)),
            Err(error) => logging::emit(
                self.log.as_ref(),
                Level::ERROR,
                &format!("{failure}: {}", error_chain(error)),
            ),
        }
    }

    async fn create(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Load, write and re-read run as separate autocommit statements. A
    /// deferred transaction spanning them would have to upgrade its read lock
    /// to a write lock, which `SQLite` refuses outright when another writer
    /// committed in between.
    async fn update(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let mut current = self.repository.get_product(&mut conn, product).await?;

        let rows_affected = self
            .repository
            .update_product(&mut conn, product, &update.name, update.price)
            .await?;

        // The row can disappear between the load and the write.
        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        let updated_at = self.repository.get_updated_at(&mut conn, product).await?;

        current.name = update.name;
        current.price = update.price;
        current.updated_at = updated_at;

        Ok(current)
    }

    async fn delete(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

fn error_chain(error: &ProductsServiceError) -> String {
    match error {
        ProductsServiceError::NotFound => error.to_string(),
        ProductsServiceError::Persistence(source) => format!("{error}: {source}"),
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let result = self.create(product).await;

        self.report(
            &result,
            |created| format!("product {} created: {}", created.id, created.name),
            "failed to create product",
        );

        result
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_products(
        &self,
        request: PaginationRequest,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total_count = self.repository.count_products(&mut tx).await?;
        let window = page_window(request.page, request.page_size, total_count);

        let products = self
            .repository
            .list_products(&mut tx, request.page_size.get(), window.offset)
            .await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            total_count,
            total_pages: window.total_pages,
            page: request.page.get(),
            page_size: request.page_size.get(),
        })
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let result = self.update(product, update).await;

        self.report(
            &result,
            |updated| format!("product {} updated: {}", updated.id, updated.name),
            &format!("failed to update product {product}"),
        );

        result
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let result = self.delete(product).await;

        self.report(
            &result,
            |_| format!("product {product} deleted"),
            &format!("failed to delete product {product}"),
        );

        result
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a new product and returns it with its generated id.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Retrieves one page of products ordered by id.
    async fn list_products(
        &self,
        request: PaginationRequest,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Replaces the name and price of a product, leaving every other field as stored.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given id.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}
