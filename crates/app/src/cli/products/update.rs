use catalog_app::{
    config::DatabaseConfig,
    domain::products::models::{ProductId, ProductUpdate},
};
use clap::Args;

use super::{connect, error_chain, print_json};

#[derive(Debug, Args)]
pub(crate) struct UpdateProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product id
    id: ProductId,

    /// New product name
    #[arg(long)]
    name: String,

    /// New unit price
    #[arg(long)]
    price: f64,
}

pub(crate) async fn run(args: UpdateProductArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if !args.price.is_finite() || args.price < 0.0 {
        return Err("price must be a non-negative number".to_string());
    }

    let app = connect(&args.database).await?;

    let product = app
        .products
        .update_product(
            args.id,
            ProductUpdate {
                name: args.name,
                price: args.price,
            },
        )
        .await
        .map_err(|error| format!("failed to update product {}: {}", args.id, error_chain(&error)))?;

    print_json(&product)
}
