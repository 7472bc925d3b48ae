// src/edgar/client.rs
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use reqwest::header;

/// Identity sent with every archive request. SEC asks for a name and contact address.
pub const DEFAULT_USER_AGENT: &str = "Filing Scout research@example.com";
pub const DEFAULT_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/";

/// Anything that can hand back the text behind a URL.
/// The locator, extractor and universe loader only ever read through this.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, EdgarError>;
}

/// Static request configuration, fixed for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    pub user_agent: String,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// reqwest client configured for EDGAR interaction.
pub struct EdgarClient {
    http: reqwest::Client,
    config: EdgarConfig,
}

impl EdgarClient {
    pub fn new(config: EdgarConfig) -> Result<Self, EdgarError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str()) // Set the required User-Agent
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl DocumentSource for EdgarClient {
    /// Downloads a document, mapping non-2xx statuses to errors.
    async fn fetch_text(&self, url: &str) -> Result<String, EdgarError> {
        tracing::debug!("GET {} (User-Agent: {})", url, self.config.user_agent);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,text/plain,*/*")
            .send()
            .await?;

        if let Some(err) = status_error(response.status(), url) {
            tracing::error!("HTTP error for URL {}: {}", url, err);
            return Err(err);
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

/// Maps a non-2xx status to the matching error; `None` for success.
fn status_error(status: reqwest::StatusCode, url: &str) -> Option<EdgarError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        reqwest::StatusCode::FORBIDDEN => EdgarError::Forbidden(url.to_string()),
        reqwest::StatusCode::NOT_FOUND => EdgarError::DocumentNotFound(url.to_string()),
        _ => EdgarError::Http {
            status,
            url: url.to_string(),
        },
    })
}
