use std::path::PathBuf;

use catalog_app::{config::DatabaseConfig, domain::spreadsheets::SpreadsheetFormat};
use clap::Args;

use super::{connect, error_chain, write_payload};

#[derive(Debug, Args)]
pub(crate) struct ExportProductsArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Spreadsheet format
    #[arg(long, value_enum, default_value_t = SpreadsheetFormat::Xlsx)]
    format: SpreadsheetFormat,

    /// Output file; the base64 payload is printed when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: ExportProductsArgs) -> Result<(), String> {
    let app = connect(&args.database).await?;

    let payload = app
        .exports
        .export_products(args.format)
        .await
        .map_err(|error| format!("export failed: {}", error_chain(&error)))?;

    write_payload(&payload, args.output.as_deref()).await
}
