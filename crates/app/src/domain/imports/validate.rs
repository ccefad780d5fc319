//! Field checks applied to each import row.

use crate::domain::{
    imports::{errors::ValidationError, models::ImportRow},
    products::models::NewProduct,
    spreadsheets::Column,
};

/// Converts a parsed row into a product ready to be stored.
///
/// # Errors
///
/// Returns the first field that fails its check.
pub fn validate_row(row: &ImportRow) -> Result<NewProduct, ValidationError> {
    if row.malformed {
        return Err(ValidationError::InvalidEncoding);
    }

    let name = row.cell(Column::Name);

    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    Ok(NewProduct {
        name: name.to_string(),
        price: parse_price(row.cell(Column::Price))?,
        category: optional(row.cell(Column::Category)),
        stock: parse_stock(row.cell(Column::Stock))?,
        description: optional(row.cell(Column::Description)),
        image_url: optional(row.cell(Column::ImageUrl)),
    })
}

fn parse_price(text: &str) -> Result<f64, ValidationError> {
    let price = text
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ValidationError::InvalidPrice(text.to_string()))?;

    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }

    Ok(price)
}

/// Blank stock means none on hand. Whole-number decimals such as `"10.0"` are
/// accepted since spreadsheet tools often store counts as floats.
fn parse_stock(text: &str) -> Result<u32, ValidationError> {
    if text.is_empty() {
        return Ok(0);
    }

    if let Ok(stock) = text.parse::<u32>() {
        return Ok(stock);
    }

    let (whole, fraction) = text
        .split_once('.')
        .ok_or_else(|| ValidationError::InvalidStock(text.to_string()))?;

    if fraction.bytes().all(|digit| digit == b'0') {
        if let Ok(stock) = whole.parse::<u32>() {
            return Ok(stock);
        }
    }

    Err(ValidationError::InvalidStock(text.to_string()))
}

fn optional(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
