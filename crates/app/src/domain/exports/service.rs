//! Export service.

use std::{num::NonZeroU32, sync::Arc};

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::domain::{
    exports::errors::ExportError,
    products::{
        ProductsService,
        models::{PaginationRequest, Product},
    },
    spreadsheets::{Column, SpreadsheetFormat, encode_payload},
};

const EXPORT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(199);

/// Cell value as written to a spreadsheet.
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

#[derive(Clone)]
pub struct ExportService {
    products: Arc<dyn ProductsService>,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService").finish_non_exhaustive()
    }
}

impl ExportService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products }
    }

    /// Builds an empty import spreadsheet containing only the header row,
    /// base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn import_template(&self, format: SpreadsheetFormat) -> Result<String, ExportError> {
        Ok(encode_payload(&render(&[], format)?))
    }

    /// Renders every stored product under the import header, base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if products cannot be loaded or the document cannot be
    /// written.
    pub async fn export_products(&self, format: SpreadsheetFormat) -> Result<String, ExportError> {
        let products = self.load_all().await?;

        info!(products = products.len(), %format, "exporting products");

        Ok(encode_payload(&render(&products, format)?))
    }

    async fn load_all(&self) -> Result<Vec<Product>, ExportError> {
        let mut products = Vec::new();
        let mut page = NonZeroU32::MIN;

        loop {
            let listing = self
                .products
                .list_products(PaginationRequest::new(page, EXPORT_PAGE_SIZE))
                .await?;

            products.extend(listing.products);

            if u64::from(page.get()) >= listing.total_pages {
                break;
            }

            let Some(next) = page.checked_add(1) else {
                break;
            };

            page = next;
        }

        Ok(products)
    }
}

fn cells(product: &Product) -> [Cell<'_>; 6] {
    Column::ALL.map(|column| match column {
        Column::Name => Cell::Text(&product.name),
        Column::Price => Cell::Number(product.price),
        Column::Category => Cell::Text(product.category.as_deref().unwrap_or_default()),
        Column::Stock => Cell::Number(f64::from(product.stock)),
        Column::Description => Cell::Text(product.description.as_deref().unwrap_or_default()),
        Column::ImageUrl => Cell::Text(product.image_url.as_deref().unwrap_or_default()),
    })
}

fn render(products: &[Product], format: SpreadsheetFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        SpreadsheetFormat::Xlsx => render_xlsx(products),
        SpreadsheetFormat::Csv => render_csv(products),
    }
}

fn render_xlsx(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in (0_u16..).zip(Column::ALL) {
        worksheet.write_string(0, col, column.header())?;
    }

    for (row, product) in (1_u32..).zip(products) {
        for (col, cell) in (0_u16..).zip(cells(product)) {
            match cell {
                Cell::Text("") => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, number)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn render_csv(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(Column::ALL.map(Column::header))?;

    for product in products {
        writer.write_record(cells(product).map(|cell| match cell {
            Cell::Text(text) => text.to_string(),
            Cell::Number(number) => number.to_string(),
        }))?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            imports::parse::parse_rows,
            products::models::NewProduct,
            spreadsheets::decode_payload,
        },
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    #[tokio::test]
    async fn template_contains_only_the_header() -> TestResult {
        let ctx = TestContext::new().await;

        let csv = decode_payload(&ctx.exports.import_template(SpreadsheetFormat::Csv)?)?;

        assert_eq!(
            String::from_utf8(csv)?,
            "Name,Price,Category,Stock,Description,Image URL\n"
        );

        let xlsx = decode_payload(&ctx.exports.import_template(SpreadsheetFormat::Xlsx)?)?;

        assert!(parse_rows(&xlsx, SpreadsheetFormat::Xlsx)?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn exported_products_read_back_through_the_importer() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(NewProduct {
                category: Some("Garden".to_string()),
                stock: 9,
                ..new_product("Rake", 14.5)
            })
            .await?;
        ctx.products.create_product(new_product("Hose", 30.0)).await?;

        for format in [SpreadsheetFormat::Csv, SpreadsheetFormat::Xlsx] {
            let bytes = decode_payload(&ctx.exports.export_products(format).await?)?;
            let rows = parse_rows(&bytes, format)?;

            assert_eq!(rows.len(), 2, "format {format}");

            let rake = rows.first().ok_or("missing row")?;

            assert_eq!(rake.cell(Column::Name), "Rake");
            assert_eq!(rake.cell(Column::Price), "14.5");
            assert_eq!(rake.cell(Column::Category), "Garden");
            assert_eq!(rake.cell(Column::Stock), "9");
            assert_eq!(rake.cell(Column::Description), "");
        }

        Ok(())
    }

    #[tokio::test]
    async fn export_walks_every_page() -> TestResult {
        let ctx = TestContext::new().await;

        for index in 0..450 {
            ctx.products
                .create_product(new_product(&format!("Item {index}"), 1.0))
                .await?;
        }

        let bytes = decode_payload(&ctx.exports.export_products(SpreadsheetFormat::Csv).await?)?;

        assert_eq!(parse_rows(&bytes, SpreadsheetFormat::Csv)?.len(), 450);

        Ok(())
    }
}
