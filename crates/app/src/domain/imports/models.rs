//! Product import models.

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::domain::{
    imports::errors::RowError,
    products::models::Product,
    spreadsheets::Column,
};

/// One non-blank data row read from the spreadsheet.
///
/// `index` is 1-based and counts data rows below the header, so row `n` is
/// sheet row `n + 1`. A `malformed` row could not be decoded as text and has
/// no cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    pub index: usize,
    pub cells: FxHashMap<Column, String>,
    pub malformed: bool,
}

impl ImportRow {
    /// Trimmed cell text for `column`, empty when the column or cell is missing.
    #[must_use]
    pub fn cell(&self, column: Column) -> &str {
        self.cells.get(&column).map_or("", |text| text.trim())
    }
}

/// A row that could not be imported.
#[derive(Debug, Serialize)]
pub struct ImportRejection {
    pub row: usize,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RowError,
}

fn serialize_reason<S: Serializer>(reason: &RowError, serializer: S) -> Result<S::Ok, S::Error> {
    match reason {
        RowError::Validation(error) => serializer.collect_str(error),
        RowError::Persistence(error) => serializer.collect_str(&format_args!("{reason}: {error}")),
    }
}

/// Result of importing one row.
#[derive(Debug)]
pub enum ImportOutcome {
    Created(Product),
    Rejected(ImportRejection),
}

/// Totals for one import request.
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub created: usize,
    pub rejected: usize,
    pub rejections: Vec<ImportRejection>,
}

impl ImportSummary {
    /// Folds one row outcome into the totals.
    #[must_use]
    pub fn record(mut self, outcome: ImportOutcome) -> Self {
        self.total_rows += 1;

        match outcome {
            ImportOutcome::Created(_) => self.created += 1,
            ImportOutcome::Rejected(rejection) => {
                self.rejected += 1;
                self.rejections.push(rejection);
            }
        }

        self
    }
}
