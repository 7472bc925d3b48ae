// src/extractors/product.rs

// --- Imports ---
use crate::edgar::client::DocumentSource;
use crate::edgar::models::FilingReference;
use crate::extractors::prompt::{
    build_prompt, response_schema, ProductReport, NO_PRODUCT_DESCRIPTION, NO_PRODUCT_NAME,
};
use crate::llm::ChatModel;
use crate::utils::error::{AppError, ExtractError};
use std::time::Instant;

/// Column names of the result file, in order.
pub const CSV_HEADER: [&str; 5] = [
    "company_name",
    "stock_name",
    "filing_time",
    "new_product",
    "product_description",
];

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRow {
    pub company_name: String,
    pub ticker: String,
    pub filing_date: String,
    pub product_name: String,
    pub product_description: String,
}

impl ExtractionRow {
    /// Builds a row from a validated reply, cleaning up the product fields.
    pub fn from_report(filing: &FilingReference, report: ProductReport) -> Self {
        Self {
            company_name: filing.company_name.clone(),
            ticker: filing.ticker.clone(),
            filing_date: report.date_of_report,
            product_name: clean_field(&report.new_product, NO_PRODUCT_NAME),
            product_description: clean_field(&report.product_description, NO_PRODUCT_DESCRIPTION),
        }
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.ticker.clone(),
            self.filing_date.clone(),
            self.product_name.clone(),
            self.product_description.clone(),
        ]
    }
}

/// Header record followed by one record per row, ready for the CSV writer.
pub fn with_header(rows: &[ExtractionRow]) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(rows.len() + 1);
    records.push(CSV_HEADER.iter().map(|h| h.to_string()).collect());
    records.extend(rows.iter().map(ExtractionRow::to_record));
    records
}

/// Models echo `&amp;` from the HTML they read; blank answers get the sentinel.
fn clean_field(value: &str, fallback: &str) -> String {
    let cleaned = value.replace("&amp;", "and");
    if cleaned.trim().is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

/// Checks raw model output against the report shape.
pub fn parse_report(url: &str, raw: &str) -> Result<ProductReport, ExtractError> {
    serde_json::from_str(raw).map_err(|source| ExtractError::InvalidOutput {
        url: url.to_string(),
        source,
    })
}

// --- Main Extractor Structure ---
pub struct ProductExtractor<'a> {
    source: &'a dyn DocumentSource,
    model: &'a dyn ChatModel,
}

impl<'a> ProductExtractor<'a> {
    pub fn new(source: &'a dyn DocumentSource, model: &'a dyn ChatModel) -> Self {
        Self { source, model }
    }

    /// Runs every filing through the model, one at a time.
    ///
    /// A document that cannot be downloaded, or whose reply does not fit the
    /// schema, is logged and left out. Failing to reach the model at all
    /// aborts the run.
    pub async fn extract(&self, filings: &[FilingReference]) -> Result<Vec<ExtractionRow>, AppError> {
        let start = Instant::now();
        let schema = response_schema();
        let mut rows = Vec::with_capacity(filings.len());

        for filing in filings {
            let content = match self.source.fetch_text(&filing.document_url).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::error!("Skipping {}: download failed: {}", filing.document_url, e);
                    continue;
                }
            };
            tracing::info!(
                "Extracting products for {} ({}) from {} bytes",
                filing.company_name,
                filing.ticker,
                content.len()
            );

            let prompt = build_prompt(&content);
            let raw = self.model.complete_json(&prompt, &schema).await?;
            tracing::debug!("Model reply for {}: {}", filing.document_url, raw);

            match parse_report(&filing.document_url, &raw) {
                Ok(report) => rows.push(ExtractionRow::from_report(filing, report)),
                Err(e) => tracing::warn!("Skipping {}: {}", filing.document_url, e),
            }
        }

        tracing::info!(
            "Time taken for the chat operation: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(rows)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{ScriptedModel, StaticSource};

    fn filing(url: &str) -> FilingReference {
        FilingReference {
            document_url: url.to_string(),
            company_name: "Acme Corp".to_string(),
            ticker: "ACME".to_string(),
        }
    }

    fn report(date: &str, name: &str, description: &str) -> ProductReport {
        ProductReport {
            date_of_report: date.to_string(),
            new_product: name.to_string(),
            product_description: description.to_string(),
        }
    }

    #[test]
    fn blank_fields_get_sentinels() {
        let row = ExtractionRow::from_report(&filing("u"), report("2024-10-01", "", "   "));
        assert_eq!(row.product_name, "none");
        assert_eq!(row.product_description, "No new products mentioned.");
        assert_eq!(row.filing_date, "2024-10-01");
    }

    #[test]
    fn ampersand_entity_becomes_and() {
        let row = ExtractionRow::from_report(
            &filing("u"),
            report("2024-10-01", "Salt &amp; Pepper Co.", "Spices &amp; more"),
        );
        assert_eq!(row.product_name, "Salt and Pepper Co.");
        assert_eq!(row.product_description, "Spices and more");
    }

    #[test]
    fn header_comes_first() {
        let rows = vec![ExtractionRow::from_report(&filing("u"), report("d", "n", "p"))];
        let records = with_header(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CSV_HEADER.to_vec());
        assert_eq!(records[1], vec!["Acme Corp", "ACME", "d", "n", "p"]);
    }

    #[test]
    fn rejects_reply_missing_a_field() {
        let err = parse_report("u", r#"{"date_of_report":"2024","new_product":"X"}"#).unwrap_err();
        assert!(err.to_string().contains("u"));
        assert!(parse_report("u", "<think>hmm</think>").is_err());
    }

    #[tokio::test]
    async fn extracts_one_row_per_document() {
        let source = StaticSource::new()
            .with_page("https://a.test/1.htm", "Acme unveils Widget X.")
            .with_page("https://a.test/2.htm", "Acme refinances senior notes.");
        let model = ScriptedModel::new()
            .reply(r#"{"date_of_report":"2024-10-01","new_product":"Widget X","product_description":"A new widget."}"#)
            .reply(r#"{"date_of_report":"2024-11-01","new_product":"","product_description":""}"#);

        let extractor = ProductExtractor::new(&source, &model);
        let rows = extractor
            .extract(&[filing("https://a.test/1.htm"), filing("https://a.test/2.htm")])
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "Widget X");
        assert_eq!(rows[1].product_name, "none");
        assert_eq!(rows[1].product_description, "No new products mentioned.");

        let prompts = model.prompts();
        assert!(prompts[0].contains("Acme unveils Widget X."));
        assert!(prompts[1].contains("Acme refinances senior notes."));
    }

    #[tokio::test]
    async fn bad_documents_and_replies_are_skipped() {
        let source = StaticSource::new()
            .with_page("https://a.test/ok.htm", "fine")
            .with_page("https://a.test/garbled.htm", "fine too");
        let model = ScriptedModel::new()
            .reply("this is not json")
            .reply(r#"{"date_of_report":"2024-12-01","new_product":"Gizmo","product_description":"Small."}"#);

        let extractor = ProductExtractor::new(&source, &model);
        let rows = extractor
            .extract(&[
                filing("https://a.test/missing.htm"),
                filing("https://a.test/garbled.htm"),
                filing("https://a.test/ok.htm"),
            ])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Gizmo");
        // The missing document never reached the model
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn model_transport_failure_aborts() {
        let source = StaticSource::new().with_page("https://a.test/1.htm", "text");
        let model = ScriptedModel::new().fail("connection refused");
        let extractor = ProductExtractor::new(&source, &model);
        let result = extractor.extract(&[filing("https://a.test/1.htm")]).await;
        assert!(matches!(result, Err(AppError::Ai(_))));
    }
}
