//! Spreadsheet layout shared by product import and export.

use std::fmt::{Display, Formatter, Result as FmtResult};

use base64::{DecodeError, Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Supported spreadsheet document formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook; the first worksheet is used.
    #[default]
    Xlsx,

    /// Comma separated values.
    Csv,
}

impl Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Xlsx => f.write_str("xlsx"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// Product columns, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Price,
    Category,
    Stock,
    Description,
    ImageUrl,
}

impl Column {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Price,
        Self::Category,
        Self::Stock,
        Self::Description,
        Self::ImageUrl,
    ];

    /// Header text written to templates and exports.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Price => "Price",
            Self::Category => "Category",
            Self::Stock => "Stock",
            Self::Description => "Description",
            Self::ImageUrl => "Image URL",
        }
    }

    /// Matches a header cell, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_header(text: &str) -> Option<Self> {
        let text = text.trim();

        Self::ALL
            .into_iter()
            .find(|column| column.header().eq_ignore_ascii_case(text))
    }
}

/// Encodes spreadsheet bytes for transport.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes a transport payload back into spreadsheet bytes.
///
/// # Errors
///
/// Returns an error when the payload is not valid standard base64.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(payload.trim())
}
