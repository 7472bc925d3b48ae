// src/main.rs
mod edgar;
mod extractors;
mod llm;
mod pipeline;
mod storage;
mod utils;

use chrono::Datelike;
use clap::Parser;
use edgar::client::{DEFAULT_ARCHIVES_URL, DEFAULT_USER_AGENT};
use edgar::{universe, EdgarClient, EdgarConfig, FormType, Quarter};
use llm::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use llm::{OllamaClient, SamplingOptions};
use pipeline::ScanSettings;
use std::path::PathBuf;
use utils::AppError;

/// First year EDGAR publishes a full index for.
const FIRST_INDEX_YEAR: u32 = 1993;

/// Scan EDGAR filings for newly announced products
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Filing year of the quarterly master index
    #[arg(short, long, default_value_t = 2024)]
    year: u32,

    /// Index quarter (QTR1..QTR4)
    #[arg(short, long, default_value = "QTR4")]
    quarter: Quarter,

    /// Form type to look for (8-K, 10-K or 10-Q)
    #[arg(short, long, default_value = "8-K")]
    form: FormType,

    /// Stop after this many filings in total
    #[arg(short, long, default_value_t = 100)]
    max_results: usize,

    /// CSV file to (over)write with results
    #[arg(short, long, default_value = storage::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Local `name,cik,ticker` CSV to use instead of the S&P 500 list
    #[arg(long)]
    companies_file: Option<PathBuf>,

    /// Page whose first table lists the companies to scan
    #[arg(long, default_value = universe::SP500_URL)]
    universe_url: String,

    /// EDGAR archive root
    #[arg(long, default_value = DEFAULT_ARCHIVES_URL)]
    archives_url: String,

    /// User-Agent sent to the SEC (name and contact email)
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Ollama server address
    #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model used for extraction
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,

    /// Sampling candidate pool size
    #[arg(long, default_value_t = 10)]
    top_k: u32,
}

impl Args {
    fn validate(&self) -> Result<(), AppError> {
        let current_year = chrono::Utc::now().year() as u32;
        if self.year < FIRST_INDEX_YEAR || self.year > current_year {
            return Err(AppError::Config(format!(
                "year {} is outside the EDGAR full index range {}..={}",
                self.year, FIRST_INDEX_YEAR, current_year
            )));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    args.validate()?;
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Clients
    let edgar = EdgarClient::new(EdgarConfig {
        user_agent: args.user_agent.clone(),
    })?;
    let model = OllamaClient::new(
        &args.ollama_url,
        &args.model,
        SamplingOptions {
            temperature: args.temperature,
            top_k: args.top_k,
        },
    );

    // 4. Company universe
    let companies = match &args.companies_file {
        Some(path) => universe::load_company_file(path)?,
        None => universe::load_sp500(&edgar, &args.universe_url).await?,
    };
    if companies.is_empty() {
        return Err(AppError::Config("company list is empty".to_string()));
    }

    // 5. Locate, extract, write
    let settings = ScanSettings {
        year: args.year,
        quarter: args.quarter,
        form: args.form,
        max_results: args.max_results,
        archives_url: args.archives_url.clone(),
        output: args.output.clone(),
    };
    let summary = pipeline::run(&settings, &companies, &edgar, &model).await?;

    tracing::info!(
        "Processing finished. Filings: {}, Rows: {}, Output: {}",
        summary.located,
        summary.extracted,
        summary.output.display()
    );

    Ok(())
}
