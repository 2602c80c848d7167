//! Error types for loading CV data

use thiserror::Error;

/// Result type for CV data operations
pub type Result<T> = std::result::Result<T, CvError>;

/// CV data errors
#[derive(Error, Debug)]
pub enum CvError {
    #[error("Failed to read CV data from {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CV data must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("basics is required and must be an object")]
    MissingBasics,

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

/// Name of a JSON value's type, for messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
