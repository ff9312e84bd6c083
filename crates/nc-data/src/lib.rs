//! Data set file handling for the neuroConstruct data set tools

pub mod codec;
pub mod config;
pub mod library;

use std::path::PathBuf;
use nc_core::ModelError;
use thiserror::Error;

// Re-exports
pub use codec::{decode_str, decode_str_with_config, encode, load, load_partial, read_with_config, save, LoadMode};
pub use config::DataSetConfig;
pub use library::{DataSetEntry, DataSetLibrary};

/// Errors that can occur in data set operations
#[derive(Error, Debug)]
pub enum DataError {
    /// The backing file does not exist
    #[error("Could not find Data Set file: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but its content does not follow the data set format
    #[error("Problem reading Data Set file: {}, line {line}: {reason} ({text:?})", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        text: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Another data set already uses the target file
    #[error("Data Set file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// The reference cannot be turned into a file name inside the directory
    #[error("Invalid Data Set name: {0:?}")]
    InvalidName(String),

    #[error("Data set has no backing file: {0}")]
    NoBackingFile(String),

    #[error("No data set in row {row}, only {count} rows")]
    InvalidRow { row: usize, count: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl DataError {
    /// True for errors caused by file content rather than file access
    pub fn is_format_error(&self) -> bool {
        matches!(self, DataError::Format { .. })
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            DataError::Io(error.into())
        } else {
            DataError::Config(error.to_string())
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;
