use std::path::Path;

use catalog_app::{
    config::DatabaseConfig, context::AppContext, domain::spreadsheets::decode_payload,
};
use clap::{Args, Subcommand};
use serde::Serialize;

mod create;
mod delete;
mod export;
mod get;
mod import;
mod list;
mod template;
mod update;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Create a single product
    Create(create::CreateProductArgs),
    /// Show one product
    Get(get::GetProductArgs),
    /// List products one page at a time
    List(list::ListProductsArgs),
    /// Change a product's name and price
    Update(update::UpdateProductArgs),
    /// Permanently delete a product
    Delete(delete::DeleteProductArgs),
    /// Bulk-import products from a spreadsheet
    Import(import::ImportProductsArgs),
    /// Write every product to a spreadsheet
    Export(export::ExportProductsArgs),
    /// Write an empty import spreadsheet
    Template(template::TemplateArgs),
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::Create(args) => create::run(args).await,
        ProductsSubcommand::Get(args) => get::run(args).await,
        ProductsSubcommand::List(args) => list::run(args).await,
        ProductsSubcommand::Update(args) => update::run(args).await,
        ProductsSubcommand::Delete(args) => delete::run(args).await,
        ProductsSubcommand::Import(args) => import::run(args).await,
        ProductsSubcommand::Export(args) => export::run(args).await,
        ProductsSubcommand::Template(args) => template::run(args).await,
    }
}

async fn connect(config: &DatabaseConfig) -> Result<AppContext, String> {
    AppContext::from_database_url(&config.database_url)
        .await
        .map_err(|error| error_chain(&error))
}

/// Renders an error followed by its source, if any.
fn error_chain(error: &dyn std::error::Error) -> String {
    match error.source() {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to render output: {error}"))?;

    println!("{json}");

    Ok(())
}

/// Writes a decoded payload to `output`, or prints the base64 text.
async fn write_payload(payload: &str, output: Option<&Path>) -> Result<(), String> {
    let Some(output) = output else {
        println!("{payload}");
        return Ok(());
    };

    let bytes = decode_payload(payload)
        .map_err(|error| format!("failed to decode payload: {error}"))?;

    tokio::fs::write(output, bytes)
        .await
        .map_err(|error| format!("failed to write {}: {error}", output.display()))?;

    println!("wrote {}", output.display());

    Ok(())
}
