use catalog_app::{config::DatabaseConfig, domain::products::models::ProductId};
use clap::Args;

use super::{connect, error_chain, print_json};

#[derive(Debug, Args)]
pub(crate) struct GetProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product id
    id: ProductId,
}

pub(crate) async fn run(args: GetProductArgs) -> Result<(), String> {
    let app = connect(&args.database).await?;

    let product = app
        .products
        .get_product(args.id)
        .await
        .map_err(|error| format!("failed to fetch product {}: {}", args.id, error_chain(&error)))?;

    print_json(&product)
}
