// src/edgar/universe.rs
use crate::edgar::client::DocumentSource;
use crate::edgar::models::CompanyRecord;
use crate::utils::error::{AppError, EdgarError};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

pub const SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

const CIK_WIDTH: usize = 10;

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("Failed to compile TABLE_SELECTOR"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));
static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("Failed to compile HEADER_CELL_SELECTOR"));
static DATA_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile DATA_CELL_SELECTOR"));

/// Downloads the S&P 500 constituents page and reads its first table.
pub async fn load_sp500(
    source: &dyn DocumentSource,
    url: &str,
) -> Result<Vec<CompanyRecord>, EdgarError> {
    tracing::info!("Loading company universe from {}", url);
    let html = source.fetch_text(url).await?;
    let companies = parse_company_table(&html)?;
    tracing::info!("Loaded {} companies", companies.len());
    Ok(companies)
}

/// Reads `Security`, `CIK` and `Symbol` out of the first `<table>` in the page.
pub fn parse_company_table(html: &str) -> Result<Vec<CompanyRecord>, EdgarError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| EdgarError::Parse("no table on company universe page".to_string()))?;

    let headers: Vec<String> = table
        .select(&ROW_SELECTOR)
        .map(|tr| tr.select(&HEADER_CELL_SELECTOR).map(cell_text).collect::<Vec<_>>())
        .find(|cells| !cells.is_empty())
        .ok_or_else(|| EdgarError::Parse("company table has no header row".to_string()))?;

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| EdgarError::Parse(format!("company table has no '{}' column", name)))
    };
    let name_col = column("Security")?;
    let cik_col = column("CIK")?;
    let ticker_col = column("Symbol")?;

    let mut companies = Vec::new();
    for tr in table.select(&ROW_SELECTOR) {
        let cells: Vec<String> = tr.select(&DATA_CELL_SELECTOR).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }
        let cell = |idx: usize| {
            cells.get(idx).cloned().ok_or_else(|| {
                EdgarError::Parse(format!("company row has {} cells, expected column {}", cells.len(), idx))
            })
        };
        upsert(
            &mut companies,
            CompanyRecord {
                name: cell(name_col)?,
                cik: pad_cik(&cell(cik_col)?),
                ticker: cell(ticker_col)?,
            },
        );
    }

    Ok(companies)
}

/// Reads a local `name,cik,ticker` CSV instead of downloading the universe.
pub fn load_company_file<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyRecord>, AppError> {
    let path = path.as_ref();
    tracing::info!("Loading company universe from {}", path.display());
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

    let mut companies = Vec::new();
    for record in reader.deserialize::<CompanyRecord>() {
        let mut company =
            record.map_err(|e| AppError::Config(format!("bad row in {}: {}", path.display(), e)))?;
        company.cik = pad_cik(&company.cik);
        upsert(&mut companies, company);
    }
    Ok(companies)
}

/// Left-pads a CIK with zeros to EDGAR's ten digits.
pub fn pad_cik(raw: &str) -> String {
    format!("{:0>width$}", raw.trim(), width = CIK_WIDTH)
}

/// Later rows win, earlier position is kept.
fn upsert(companies: &mut Vec<CompanyRecord>, company: CompanyRecord) {
    match companies.iter_mut().find(|c| c.name == company.name) {
        Some(existing) => *existing = company,
        None => companies.push(company),
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::StaticSource;
    use std::io::Write;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable sortable" id="constituents">
          <tbody>
            <tr><th>Symbol</th><th>Security</th><th>GICS Sector</th><th>CIK</th><th>Founded</th></tr>
            <tr><td><a href="/x">MMM</a></td><td><a href="/3m">3M</a></td><td>Industrials</td><td>66740</td><td>1902</td></tr>
            <tr><td>AAPL</td><td>Apple Inc.</td><td>Information Technology</td><td>320193</td><td>1977</td></tr>
            <tr><td>FOO</td><td>3M</td><td>Industrials</td><td>1</td><td>1902</td></tr>
          </tbody>
        </table>
        <table><tr><th>Date</th><th>Added</th></tr></table>
        </body></html>
    "#;

    #[test]
    fn pads_cik_to_ten_digits() {
        assert_eq!(pad_cik("320193"), "0000320193");
        assert_eq!(pad_cik(" 66740 "), "0000066740");
        assert_eq!(pad_cik("12345678901"), "12345678901");
    }

    #[test]
    fn parses_first_table_by_header_names() {
        let companies = parse_company_table(PAGE).unwrap();
        assert_eq!(companies.len(), 2);
        // Duplicate name keeps its first slot but takes the later values
        assert_eq!(
            companies[0],
            CompanyRecord {
                name: "3M".to_string(),
                cik: "0000000001".to_string(),
                ticker: "FOO".to_string(),
            }
        );
        assert_eq!(companies[1].name, "Apple Inc.");
        assert_eq!(companies[1].cik, "0000320193");
        assert_eq!(companies[1].ticker, "AAPL");
    }

    #[test]
    fn missing_column_is_an_error() {
        let page = "<table><tr><th>Symbol</th><th>Security</th></tr><tr><td>A</td><td>B</td></tr></table>";
        assert!(matches!(parse_company_table(page), Err(EdgarError::Parse(_))));
        assert!(parse_company_table("<p>no tables here</p>").is_err());
    }

    #[tokio::test]
    async fn loads_universe_through_source() {
        let source = StaticSource::new().with_page(SP500_URL, PAGE);
        let companies = load_sp500(&source, SP500_URL).await.unwrap();
        assert_eq!(companies.len(), 2);
    }

    #[test]
    fn reads_local_company_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,cik,ticker").unwrap();
        writeln!(file, "Acme Corp, 42 ,ACME").unwrap();
        writeln!(file, "\"Salt, Pepper & Co\",7,SPC").unwrap();

        let companies = load_company_file(file.path()).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].cik, "0000000042");
        assert_eq!(companies[1].name, "Salt, Pepper & Co");
    }
}
