//! Error types for the outreach pipelines.

use std::path::PathBuf;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not set. {hint}")]
    MissingSecret { name: String, hint: String },

    #[error("Resume not found at {}", .0.display())]
    ResumeNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Spreadsheet-reading errors.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Workbook not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("Workbook has no sheet at index {index}")]
    MissingSheet { index: usize },
}

/// SMTP-related errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP connection failed: {0}")]
    Connect(String),

    #[error("SMTP send failed: {0}")]
    Send(String),
}

/// Page-fetching errors.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("None of the {attempted} profile pages could be fetched")]
    AllFetchesFailed { attempted: usize },
}

/// Chat-completion errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Model reply is not valid JSON: {source}. Raw reply: {raw}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
