//! Product import service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    imports::{
        errors::{ImportError, RowError},
        models::{ImportOutcome, ImportRejection, ImportRow, ImportSummary},
        parse::parse_rows,
        validate::validate_row,
    },
    products::ProductsService,
    spreadsheets::{SpreadsheetFormat, decode_payload},
};

/// Bulk product import from transport-encoded spreadsheets.
#[derive(Clone)]
pub struct ImportService {
    products: Arc<dyn ProductsService>,
}

impl std::fmt::Debug for ImportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportService").finish_non_exhaustive()
    }
}

impl ImportService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products }
    }

    /// Imports every row of a base64-encoded spreadsheet.
    ///
    /// Each row is validated and stored on its own; a bad row is recorded in the
    /// summary and the remaining rows are still processed.
    ///
    /// # Errors
    ///
    /// Returns an error, before any row is stored, when the payload cannot be
    /// decoded or is not a readable spreadsheet.
    pub async fn import_products(
        &self,
        payload: &str,
        format: SpreadsheetFormat,
    ) -> Result<ImportSummary, ImportError> {
        let bytes = decode_payload(payload)?;
        let rows = parse_rows(&bytes, format)?;

        info!(rows = rows.len(), %format, "importing products");

        let mut outcomes = Vec::with_capacity(rows.len());

        for row in &rows {
            outcomes.push(self.import_row(row).await);
        }

        let summary = outcomes
            .into_iter()
            .fold(ImportSummary::default(), ImportSummary::record);

        info!(
            total = summary.total_rows,
            created = summary.created,
            rejected = summary.rejected,
            "product import finished"
        );

        Ok(summary)
    }

    async fn import_row(&self, row: &ImportRow) -> ImportOutcome {
        let result = match validate_row(row) {
            Ok(product) => self
                .products
                .create_product(product)
                .await
                .map_err(RowError::from),
            Err(error) => Err(RowError::from(error)),
        };

        match result {
            Ok(product) => ImportOutcome::Created(product),
            Err(reason) => {
                warn!(row = row.index, %reason, "rejected import row");

                ImportOutcome::Rejected(ImportRejection {
                    row: row.index,
                    reason,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            imports::errors::{ParseError, ValidationError},
            products::{MockProductsService, ProductsServiceError, models::ProductId},
            spreadsheets::encode_payload,
        },
        test::{
            TestContext,
            helpers::{make_product, workbook},
        },
    };

    use super::*;

    fn three_rows_with_negative_second_price() -> Result<String, rust_xlsxwriter::XlsxError> {
        let bytes = workbook(&[
            &["Widget", "10", "Tools", "5", "", ""],
            &["Gadget", "-3", "Tools", "1", "", ""],
            &["Doohickey", "2.5", "", "", "Small", ""],
        ])?;

        Ok(encode_payload(&bytes))
    }

    #[tokio::test]
    async fn negative_price_row_is_rejected_and_others_created() -> TestResult {
        let ctx = TestContext::new().await;

        let summary = ctx
            .imports
            .import_products(
                &three_rows_with_negative_second_price()?,
                SpreadsheetFormat::Xlsx,
            )
            .await?;

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.rejected, 1);

        let rejection = summary.rejections.first().ok_or("missing rejection")?;

        assert_eq!(rejection.row, 2);
        assert!(matches!(
            rejection.reason,
            RowError::Validation(ValidationError::NegativePrice)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn imported_rows_are_persisted() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.imports
            .import_products(
                &three_rows_with_negative_second_price()?,
                SpreadsheetFormat::Xlsx,
            )
            .await?;

        let widget = ctx.products.get_product(ProductId::from_i64(1)).await?;
        let doohickey = ctx.products.get_product(ProductId::from_i64(2)).await?;

        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.stock, 5);
        assert_eq!(widget.category.as_deref(), Some("Tools"));
        assert_eq!(doohickey.name, "Doohickey");
        assert_eq!(doohickey.stock, 0);
        assert!(doohickey.category.is_none());
        assert_eq!(doohickey.description.as_deref(), Some("Small"));

        Ok(())
    }

    #[tokio::test]
    async fn csv_payload_is_imported() -> TestResult {
        let ctx = TestContext::new().await;

        let payload = encode_payload(b"Name,Price,Stock\nPen,1.25,100\n,2,1\n");

        let summary = ctx
            .imports
            .import_products(&payload, SpreadsheetFormat::Csv)
            .await?;

        assert_eq!(summary.created, 1);
        assert_eq!(summary.rejected, 1);
        assert!(matches!(
            summary.rejections.first().map(|r| (r.row, &r.reason)),
            Some((2, RowError::Validation(ValidationError::MissingName)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn non_utf8_csv_row_is_rejected_alone() -> TestResult {
        let ctx = TestContext::new().await;

        let payload = encode_payload(b"Name,Price\nPen,1\nBad\xff,2\nInk,3\n");

        let summary = ctx
            .imports
            .import_products(&payload, SpreadsheetFormat::Csv)
            .await?;

        assert_eq!(summary.created, 2);
        assert_eq!(summary.rejected, 1);
        assert!(matches!(
            summary.rejections.first().map(|r| (r.row, &r.reason)),
            Some((2, RowError::Validation(ValidationError::InvalidEncoding)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn corrupted_payload_fails_before_any_create() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let service = ImportService::new(Arc::new(products));

        let result = service
            .import_products("%%% not base64 %%%", SpreadsheetFormat::Xlsx)
            .await;

        assert!(
            matches!(result, Err(ImportError::Decode(_))),
            "expected Decode, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreadable_spreadsheet_fails_before_any_create() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let service = ImportService::new(Arc::new(products));

        let result = service
            .import_products(&encode_payload(b"plain text"), SpreadsheetFormat::Xlsx)
            .await;

        assert!(
            matches!(result, Err(ImportError::Parse(ParseError::Xlsx(_)))),
            "expected Parse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn persistence_failure_rejects_only_that_row() -> TestResult {
        let mut products = MockProductsService::new();
        let mut next_id = 0;

        products.expect_create_product().times(3).returning(move |new| {
            next_id += 1;

            if new.name == "Gadget" {
                Err(ProductsServiceError::Persistence(sqlx::Error::PoolTimedOut))
            } else {
                Ok(make_product(next_id, &new.name))
            }
        });

        let service = ImportService::new(Arc::new(products));

        let payload = encode_payload(&workbook(&[
            &["Widget", "1"],
            &["Gadget", "2"],
            &["Gizmo", "3"],
        ])?);

        let summary = service
            .import_products(&payload, SpreadsheetFormat::Xlsx)
            .await?;

        assert_eq!(summary.created, 2);
        assert_eq!(summary.rejected, 1);
        assert!(matches!(
            summary.rejections.first().map(|r| (r.row, &r.reason)),
            Some((2, RowError::Persistence(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn header_only_spreadsheet_imports_nothing() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let service = ImportService::new(Arc::new(products));

        let summary = service
            .import_products(&encode_payload(b"Name,Price\n"), SpreadsheetFormat::Csv)
            .await?;

        assert_eq!(summary.total_rows, 0);
        assert!(summary.rejections.is_empty());

        Ok(())
    }
}
