use std::io;
use std::path::PathBuf;

use thiserror::Error;
use xjanko_core::CandidateFailures;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("category must start with '/': {0}")]
    InvalidCategory(String),

    #[error("bad catalog pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "data element in '{}' has type '{found}', expected application/x-janko",
        path.display()
    )]
    WrongDataType { path: PathBuf, found: String },

    #[error("'{}' was not parsed:\n{failures}", path.display())]
    NotParsed {
        path: PathBuf,
        failures: CandidateFailures,
    },

    #[error("{count} file(s) failed to parse")]
    BatchFailed { count: usize },
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
