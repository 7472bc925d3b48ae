// src/edgar/locator.rs

// --- Imports ---
use crate::edgar::client::DocumentSource;
use crate::edgar::models::{CompanyRecord, FilingReference, FormType, Quarter};
use crate::utils::error::EdgarError;
use once_cell::sync::Lazy;
use regex::Regex;

// Primary document name inside a full submission text file, e.g. `<FILENAME>aapl-20241031.htm`
static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"FILENAME>([^\n]*)").expect("Failed to compile FILENAME_RE"));

/// Walks a quarterly master index and resolves matching lines to primary document URLs.
pub struct FilingLocator<'a> {
    source: &'a dyn DocumentSource,
    archives_url: String,
}

impl<'a> FilingLocator<'a> {
    /// `archives_url` is the archive root with a trailing slash.
    pub fn new(source: &'a dyn DocumentSource, archives_url: &str) -> Self {
        let mut archives_url = archives_url.to_string();
        if !archives_url.ends_with('/') {
            archives_url.push('/');
        }
        Self { source, archives_url }
    }

    pub fn master_index_url(&self, year: u32, quarter: Quarter) -> String {
        format!("{}edgar/full-index/{}/{}/master.idx", self.archives_url, year, quarter)
    }

    /// Collects up to `max_results` filing documents across all companies, in
    /// company order then index order.
    ///
    /// The index fetch and the submission fetch for a matched line are fatal;
    /// an unreachable final document is logged and skipped.
    pub async fn locate(
        &self,
        year: u32,
        quarter: Quarter,
        form: FormType,
        max_results: usize,
        companies: &[CompanyRecord],
    ) -> Result<Vec<FilingReference>, EdgarError> {
        let index_url = self.master_index_url(year, quarter);
        tracing::info!("Downloading master index: {}", index_url);
        let master_index = self.source.fetch_text(&index_url).await?;
        // Lowercased once; the raw line is kept for the form token and the path
        let lines: Vec<(&str, String)> = master_index
            .split('\n')
            .map(|line| (line, line.to_lowercase()))
            .collect();
        tracing::debug!("Master index has {} lines", lines.len());

        let mut found: Vec<FilingReference> = Vec::new();

        for company in companies {
            tracing::info!("Processing {} for {} urls.", company.name, form);
            let lowered_name = company.name.to_lowercase();

            for (line, lowered_line) in &lines {
                if found.len() >= max_results {
                    break;
                }
                if !matches_lowered(line, lowered_line, &lowered_name, form.as_str()) {
                    continue;
                }

                let document_url = self.resolve_document_url(line).await?;

                match self.source.fetch_text(&document_url).await {
                    Ok(_) => {
                        tracing::info!("Found {} URL for {}: {}", form, company.name, document_url);
                        found.push(FilingReference {
                            document_url,
                            company_name: company.name.clone(),
                            ticker: company.ticker.clone(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Error fetching {}: {}", document_url, e);
                    }
                }
            }

            if found.len() >= max_results {
                break;
            }
        }

        tracing::info!("Collected {} valid form {} URLs.", found.len(), form);
        Ok(found)
    }

    /// Turns an index line into the URL of the filing's primary document by
    /// reading the `FILENAME>` marker out of the full submission text.
    async fn resolve_document_url(&self, line: &str) -> Result<String, EdgarError> {
        let path = relative_path(line);
        let submission_url = format!("{}{}", self.archives_url, path);
        let submission = self.source.fetch_text(&submission_url).await?;

        let filename = primary_filename(&submission)
            .ok_or_else(|| EdgarError::FilenameMarkerMissing(submission_url.clone()))?;

        Ok(format!("{}{}/{}", self.archives_url, filing_folder(path), filename))
    }
}

/// Case-insensitive company name and case-sensitive form token, both as plain
/// substrings of the raw line. Loose on purpose: `8-K` also matches `8-K/A`.
pub fn line_matches(line: &str, company_name: &str, form_token: &str) -> bool {
    matches_lowered(line, &line.to_lowercase(), &company_name.to_lowercase(), form_token)
}

/// Same test as [`line_matches`] with both lowercase forms already computed.
fn matches_lowered(line: &str, lowered_line: &str, lowered_name: &str, form_token: &str) -> bool {
    lowered_line.contains(lowered_name) && line.contains(form_token)
}

/// Last `|` field of the line, e.g. `edgar/data/320193/0000320193-24-000123.txt`.
fn relative_path(line: &str) -> &str {
    line.trim().rsplit('|').next().unwrap_or_default()
}

/// Accession folder of a submission path: dashes and the `.txt` suffix removed.
fn filing_folder(path: &str) -> String {
    path.replace('-', "").replace(".txt", "")
}

/// First `FILENAME>` entry in a submission, up to the end of its line.
pub fn primary_filename(submission: &str) -> Option<&str> {
    FILENAME_RE
        .captures(submission)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
