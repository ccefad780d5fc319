//! Test Helpers

use jiff::Timestamp;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::{
    products::models::{NewProduct, Product, ProductId},
    spreadsheets::Column,
};

/// Minimal valid product input.
pub(crate) fn new_product(name: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        ..NewProduct::default()
    }
}

/// Stored product as a mocked service would return it.
pub(crate) fn make_product(id: i64, name: &str) -> Product {
    Product {
        id: ProductId::from_i64(id),
        name: name.to_string(),
        price: 1.0,
        category: None,
        stock: 0,
        description: None,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: None,
    }
}

/// XLSX workbook with the full import header followed by `rows`.
pub(crate) fn workbook(rows: &[&[&str]]) -> Result<Vec<u8>, XlsxError> {
    workbook_with_header(&Column::ALL.map(Column::header), rows)
}

/// XLSX workbook with a custom header row. Cells that parse as numbers are
/// written as numeric cells, the way spreadsheet tools store them.
pub(crate) fn workbook_with_header(
    header: &[&str],
    rows: &[&[&str]],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, text) in (0_u16..).zip(header) {
        worksheet.write_string(0, col, *text)?;
    }

    for (row, cells) in (1_u32..).zip(rows) {
        for (col, text) in (0_u16..).zip(cells.iter()) {
            if text.is_empty() {
                continue;
            }

            match text.parse::<f64>() {
                Ok(number) => worksheet.write_number(row, col, number)?,
                Err(_) => worksheet.write_string(row, col, *text)?,
            };
        }
    }

    workbook.save_to_buffer()
}
