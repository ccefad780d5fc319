//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        exports::ExportService,
        imports::ImportService,
        products::{ProductsService, SqliteProductsService},
    },
    logging::{LogSink, TracingLogSink},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub imports: ImportService,
    pub exports: ExportService,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        Ok(Self::new(Db::new(pool), Arc::new(TracingLogSink)))
    }

    /// Wire services over an open database, reporting mutations to `log`.
    #[must_use]
    pub fn new(db: Db, log: Arc<dyn LogSink>) -> Self {
        let products: Arc<dyn ProductsService> = Arc::new(SqliteProductsService::new(db, log));

        Self {
            imports: ImportService::new(Arc::clone(&products)),
            exports: ExportService::new(Arc::clone(&products)),
            products,
        }
    }
}
