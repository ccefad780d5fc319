use catalog_app::{config::DatabaseConfig, domain::products::models::NewProduct};
use clap::Args;

use super::{connect, error_chain, print_json};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: f64,

    /// Optional category
    #[arg(long)]
    category: Option<String>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Optional description
    #[arg(long)]
    description: Option<String>,

    /// Optional image URL
    #[arg(long)]
    image_url: Option<String>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if !args.price.is_finite() || args.price < 0.0 {
        return Err("price must be a non-negative number".to_string());
    }

    let app = connect(&args.database).await?;

    let product = app
        .products
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            category: args.category,
            stock: args.stock,
            description: args.description,
            image_url: args.image_url,
        })
        .await
        .map_err(|error| format!("failed to create product: {}", error_chain(&error)))?;

    print_json(&product)
}
