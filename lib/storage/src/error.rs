use std::path::PathBuf;
use thiserror::Error;

pub type LoadResult<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{column}' (available: {available:?})")]
    MissingColumn {
        column: &'static str,
        available: Vec<String>,
    },

    #[error("Invalid value '{value}' for '{column}' on line {line}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Unsupported input format: {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),
}

impl From<LoadError> for dinewise_core::Error {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Io { source, .. } => dinewise_core::Error::Io(source),
            LoadError::Json(e) => dinewise_core::Error::Serialization(e.to_string()),
            other => dinewise_core::Error::DataIntegrity(other.to_string()),
        }
    }
}
