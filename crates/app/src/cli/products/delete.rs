use catalog_app::{config::DatabaseConfig, domain::products::models::ProductId};
use clap::Args;

use super::{connect, error_chain};

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product id
    id: ProductId,
}

pub(crate) async fn run(args: DeleteProductArgs) -> Result<(), String> {
    let app = connect(&args.database).await?;

    app.products
        .delete_product(args.id)
        .await
        .map_err(|error| format!("failed to delete product {}: {}", args.id, error_chain(&error)))?;

    println!("deleted product {}", args.id);

    Ok(())
}
