//! Spreadsheet parsing into import rows.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use csv::ReaderBuilder;

use crate::domain::{
    imports::{errors::ParseError, models::ImportRow},
    spreadsheets::{Column, SpreadsheetFormat},
};

/// Cell texts of one record, `None` when the record is not valid UTF-8.
type Record = Option<Vec<String>>;

/// Columns that must be present in the header row.
const REQUIRED_COLUMNS: [Column; 2] = [Column::Name, Column::Price];

/// Parses a spreadsheet document into one [`ImportRow`] per non-blank data row.
///
/// # Errors
///
/// Returns an error when the document cannot be read, has no header row, or
/// lacks a required column.
pub fn parse_rows(bytes: &[u8], format: SpreadsheetFormat) -> Result<Vec<ImportRow>, ParseError> {
    let records = match format {
        SpreadsheetFormat::Xlsx => read_xlsx(bytes)?,
        SpreadsheetFormat::Csv => read_csv(bytes)?,
    };

    rows_from_records(records)
}

fn read_xlsx(bytes: &[u8]) -> Result<Vec<Record>, ParseError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(ParseError::EmptyDocument);
    };

    Ok(range?
        .rows()
        .map(|row| Some(row.iter().map(cell_text).collect()))
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        // Whole numbers render without a fractional part ("10", not "10.0").
        Data::Float(number) => number.to_string(),
        Data::Int(number) => number.to_string(),
        other => other.to_string(),
    }
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Record>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    reader
        .byte_records()
        .map(|record| -> Result<Record, ParseError> {
            let record = record?;

            Ok(record
                .iter()
                .map(|field| std::str::from_utf8(field).map(str::to_string))
                .collect::<Result<Vec<_>, _>>()
                .ok())
        })
        .collect()
}

fn rows_from_records(records: Vec<Record>) -> Result<Vec<ImportRow>, ParseError> {
    let mut records = records.into_iter();

    let header = records
        .next()
        .ok_or(ParseError::EmptyDocument)?
        .ok_or(ParseError::HeaderEncoding)?;
    let columns = map_header(&header);

    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !columns.contains(&Some(*required)))
    {
        return Err(ParseError::MissingColumn(missing));
    }

    Ok(records
        .enumerate()
        .filter(|(_, record)| {
            record
                .as_ref()
                .is_none_or(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        })
        .map(|(position, record)| {
            let mut row = ImportRow {
                index: position + 1,
                ..ImportRow::default()
            };

            let Some(cells) = record else {
                row.malformed = true;
                return row;
            };

            for (column, text) in columns.iter().zip(cells) {
                if let Some(column) = column {
                    row.cells.insert(*column, text);
                }
            }

            row
        })
        .collect())
}

/// Resolves each header cell to a known column. Later duplicates are ignored.
fn map_header(header: &[String]) -> Vec<Option<Column>> {
    let mut columns: Vec<Option<Column>> = Vec::with_capacity(header.len());

    for text in header {
        let column = Column::from_header(text.trim_start_matches('\u{feff}'))
            .filter(|column| !columns.contains(&Some(*column)));

        columns.push(column);
    }

    columns
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::{workbook, workbook_with_header};

    use super::*;

    #[test]
    fn parses_xlsx_rows_by_header_name() -> TestResult {
        let bytes = workbook(&[&[
            "Test Product",
            "29.99",
            "Electronics",
            "10",
            "Test description",
            "https://example.com/image.jpg",
        ]])?;

        let rows = parse_rows(&bytes, SpreadsheetFormat::Xlsx)?;

        assert_eq!(rows.len(), 1);

        let row = rows.first().ok_or("missing row")?;

        assert_eq!(row.index, 1);
        assert_eq!(row.cell(Column::Name), "Test Product");
        assert_eq!(row.cell(Column::Price), "29.99");
        assert_eq!(row.cell(Column::Category), "Electronics");
        assert_eq!(row.cell(Column::Stock), "10");
        assert_eq!(row.cell(Column::ImageUrl), "https://example.com/image.jpg");

        Ok(())
    }

    #[test]
    fn header_order_does_not_matter() -> TestResult {
        let bytes = b"stock,Image URL,price,NAME\n4,,2.5,Bolt\n";

        let rows = parse_rows(bytes, SpreadsheetFormat::Csv)?;
        let row = rows.first().ok_or("missing row")?;

        assert_eq!(row.cell(Column::Name), "Bolt");
        assert_eq!(row.cell(Column::Price), "2.5");
        assert_eq!(row.cell(Column::Stock), "4");
        assert_eq!(row.cell(Column::Category), "");

        Ok(())
    }

    #[test]
    fn blank_rows_are_skipped_but_keep_numbering() -> TestResult {
        let bytes = b"Name,Price\nFirst,1\n,\nThird,3\n";

        let rows = parse_rows(bytes, SpreadsheetFormat::Csv)?;

        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 3]);

        Ok(())
    }

    #[test]
    fn non_utf8_record_is_kept_as_malformed_row() -> TestResult {
        let bytes = b"Name,Price\nFirst,1\n\xff\xfe,2\nThird,3\n";

        let rows = parse_rows(bytes, SpreadsheetFormat::Csv)?;

        assert_eq!(
            rows.iter().map(|r| (r.index, r.malformed)).collect::<Vec<_>>(),
            vec![(1, false), (2, true), (3, false)]
        );

        Ok(())
    }

    #[test]
    fn non_utf8_header_is_a_parse_error() {
        let result = parse_rows(b"Na\xffme,Price\nFirst,1\n", SpreadsheetFormat::Csv);

        assert!(
            matches!(result, Err(ParseError::HeaderEncoding)),
            "expected HeaderEncoding, got {result:?}"
        );
    }

    #[test]
    fn unknown_columns_are_ignored() -> TestResult {
        let bytes = workbook_with_header(&["Sku", "Name", "Price"], &[&["X-1", "Nut", "0.1"]])?;

        let rows = parse_rows(&bytes, SpreadsheetFormat::Xlsx)?;
        let row = rows.first().ok_or("missing row")?;

        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.cell(Column::Name), "Nut");

        Ok(())
    }

    #[test]
    fn missing_price_column_is_a_parse_error() {
        let result = parse_rows(b"Name,Stock\nWasher,3\n", SpreadsheetFormat::Csv);

        assert!(
            matches!(result, Err(ParseError::MissingColumn(Column::Price))),
            "expected MissingColumn(Price), got {result:?}"
        );
    }

    #[test]
    fn empty_csv_is_a_parse_error() {
        let result = parse_rows(b"", SpreadsheetFormat::Csv);

        assert!(
            matches!(result, Err(ParseError::EmptyDocument)),
            "expected EmptyDocument, got {result:?}"
        );
    }

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        let result = parse_rows(b"definitely not a zip archive", SpreadsheetFormat::Xlsx);

        assert!(
            matches!(result, Err(ParseError::Xlsx(_))),
            "expected Xlsx error, got {result:?}"
        );
    }
}
