// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

pub type Result<T> = std::result::Result<T, HarvestError>;

/// Every failure of a harvest run. All of them are terminal.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("cannot open dataset {}: {source}", path.display())]
    DatasetUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("last date value not found, make sure column {column} has a value")]
    NoExistingDate { column: String },

    #[error("failed to parse date {text:?}, expected format DD.MM.YYYY")]
    MalformedDate { text: String },

    #[error("request for {month:02}.{year} failed: {source}")]
    FetchFailed {
        month: u32,
        year: i32,
        #[source]
        source: FetchError,
    },

    #[error("unexpected page structure for {month:02}.{year}, website structure might have changed: {detail}")]
    UnexpectedPageStructure { month: u32, year: i32, detail: String },

    /// `action` names the failed step, e.g. "write row 42" or "save sheet".
    #[error("failed to {action}: {source}")]
    PersistFailed {
        action: String,
        #[source]
        source: std::io::Error,
    },
}
