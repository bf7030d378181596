//! Error types for each pipeline stage.
//!
//! Every stage has its own error so callers can decide which failures are fatal
//! (see [`PipelineError`]) and which are only logged.

use thiserror::Error;

/// Failure to read the local country file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column `{0}` not found in header")]
    MissingColumn(&'static str),
}

/// Failure to fetch one region from the country API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("decode json from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response shape from {url}: expected a JSON array")]
    UnexpectedShape { url: String },
}

/// Why a single API record could not be flattened.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("invalid field: {0}")]
    InvalidField(String),
}

/// Failure to persist an output file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal conditions that stop a pipeline run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("no local country data could be loaded from {0}")]
    NoLocalData(String),
    #[error("no country data could be fetched from the API ({failed} of {requested} regions failed)")]
    NoApiData { requested: usize, failed: usize },
}
