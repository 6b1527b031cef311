use std::time::Duration;
use thiserror::Error;

/// Failures talking to the scan or recommendation service. None of them are
/// fatal; the user retries by issuing the action again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP error! status: {code}")]
    HttpStatus { code: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// An action was requested in a state that does not allow it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Scan metadata before requesting recommendations")]
    NoMetadata,

    #[error("Table name must not be empty")]
    EmptyTableName,

    #[error("A metadata scan is already in progress")]
    ScanInFlight,

    #[error("A recommendation request is already in progress")]
    RecommendationInFlight,

    #[error("Table '{0}' is not part of the current scan")]
    UnknownTable(String),

    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn { table: String, column: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No table named '{0}' in the current scan")]
    UnknownTable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
