// src/core/error.rs

use thiserror::Error;

/// Any failure of the analysis request or of interpreting its response.
///
/// The variants are kept apart for the log file. The UI collapses all of them
/// into a single generic message.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analyzer configuration: {0}")]
    Config(String),

    #[error("request to the analysis service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("analysis service returned no text payload")]
    EmptyResponse,

    #[error("analysis payload is not a valid result: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reading or writing the persisted scan history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
