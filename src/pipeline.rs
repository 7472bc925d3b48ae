// src/pipeline.rs
use crate::edgar::{CompanyRecord, DocumentSource, FilingLocator, FormType, Quarter};
use crate::extractors::{with_header, ProductExtractor};
use crate::llm::ChatModel;
use crate::storage::CsvWriter;
use crate::utils::AppError;
use std::path::PathBuf;

/// What to scan and where to put the results.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub year: u32,
    pub quarter: Quarter,
    pub form: FormType,
    pub max_results: usize,
    pub archives_url: String,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub located: usize,
    pub extracted: usize,
    pub output: PathBuf,
}

/// Locate filings, extract products from each, write the CSV.
pub async fn run(
    settings: &ScanSettings,
    companies: &[CompanyRecord],
    source: &dyn DocumentSource,
    model: &dyn ChatModel,
) -> Result<ScanSummary, AppError> {
    let locator = FilingLocator::new(source, &settings.archives_url);
    let filings = locator
        .locate(
            settings.year,
            settings.quarter,
            settings.form,
            settings.max_results,
            companies,
        )
        .await?;

    let rows = ProductExtractor::new(source, model).extract(&filings).await?;

    let output = CsvWriter::new(&settings.output).write(&with_header(&rows))?;

    Ok(ScanSummary {
        located: filings.len(),
        extracted: rows.len(),
        output,
    })
}
