use std::num::NonZeroU32;

use catalog_app::{config::DatabaseConfig, domain::products::models::PaginationRequest};
use clap::Args;

use super::{connect, error_chain, print_json};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    page: NonZeroU32,

    /// Products per page
    #[arg(long, default_value = "20")]
    page_size: NonZeroU32,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let app = connect(&args.database).await?;

    let listing = app
        .products
        .list_products(PaginationRequest::new(args.page, args.page_size))
        .await
        .map_err(|error| format!("failed to list products: {}", error_chain(&error)))?;

    print_json(&listing)
}
