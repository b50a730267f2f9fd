use std::path::PathBuf;

/// Problems with the user's input, detected before any log is scanned
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid time '{value}' (expected HH:MM:SS)")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid span '{value}': {message}")]
    InvalidSpan { value: String, message: String },

    #[error("target time {0} does not exist in the selected time zone")]
    UnresolvableTarget(String),

    #[error("time window is out of range: {0}")]
    WindowOutOfRange(String),

    #[error("no such file: {}", .0.display())]
    MissingFile(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("failed to read '{source_id}'")]
    ReadError {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output")]
    WriteError(#[source] std::io::Error),

    #[error("JSON encoding failed")]
    JsonError(#[from] serde_json::Error),
}
