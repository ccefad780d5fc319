use std::path::PathBuf;

use catalog_app::{
    config::DatabaseConfig,
    domain::spreadsheets::{SpreadsheetFormat, encode_payload},
};
use clap::Args;

use super::{connect, error_chain, print_json};

#[derive(Debug, Args)]
pub(crate) struct ImportProductsArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Spreadsheet to import
    file: PathBuf,

    /// Spreadsheet format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<SpreadsheetFormat>,

    /// The file holds base64 text rather than raw spreadsheet bytes
    #[arg(long)]
    encoded: bool,
}

pub(crate) async fn run(args: ImportProductsArgs) -> Result<(), String> {
    let format = args
        .format
        .unwrap_or_else(|| format_from_extension(&args.file));

    let contents = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let payload = if args.encoded {
        String::from_utf8(contents)
            .map_err(|error| format!("encoded payload is not text: {error}"))?
    } else {
        encode_payload(&contents)
    };

    let app = connect(&args.database).await?;

    let summary = app
        .imports
        .import_products(&payload, format)
        .await
        .map_err(|error| format!("import failed: {}", error_chain(&error)))?;

    print_json(&summary)
}

fn format_from_extension(file: &std::path::Path) -> SpreadsheetFormat {
    match file.extension().and_then(|extension| extension.to_str()) {
        Some(extension) if extension.eq_ignore_ascii_case("csv") => SpreadsheetFormat::Csv,
        _ => SpreadsheetFormat::Xlsx,
    }
}
