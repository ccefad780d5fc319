use std::path::PathBuf;

use catalog_app::{config::DatabaseConfig, domain::spreadsheets::SpreadsheetFormat};
use clap::Args;

use super::{connect, error_chain, write_payload};

#[derive(Debug, Args)]
pub(crate) struct TemplateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Spreadsheet format
    #[arg(long, value_enum, default_value_t = SpreadsheetFormat::Xlsx)]
    format: SpreadsheetFormat,

    /// Output file; the base64 payload is printed when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: TemplateArgs) -> Result<(), String> {
    let app = connect(&args.database).await?;

    let payload = app
        .exports
        .import_template(args.format)
        .map_err(|error| format!("failed to build template: {}", error_chain(&error)))?;

    write_payload(&payload, args.output.as_deref()).await
}
