// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("SEC refused the request (403), check the User-Agent: {0}")]
    Forbidden(String),

    #[error("Could not find document: {0}")]
    DocumentNotFound(String),

    #[error("No FILENAME marker in submission {0}")]
    FilenameMarkerMissing(String),

    #[error("Failed to parse EDGAR response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Model request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model endpoint returned {status}: {body}")]
    Http { status: reqwest::StatusCode, body: String },

    #[error("Could not decode model reply: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Model output for {url} does not match the report schema: {source}")]
    InvalidOutput {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError), // Automatically convert Edgar errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("AI processing failed: {0}")]
    Ai(#[from] LlmError),
}
