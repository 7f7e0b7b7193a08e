// ABOUTME: Error types for the directive preprocessor
// ABOUTME: Every variant names the source document and line the directive appeared on

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("{source_name}[{line}]: Missed closed '\"'")]
    UnterminatedQuote { source_name: String, line: usize },

    #[error("{source_name}[{line}]: Could not find a filename")]
    MissingFileName { source_name: String, line: usize },

    #[error("{source_name}[{line}]: The file '{}' does not exist", path.display())]
    FileNotFound {
        source_name: String,
        line: usize,
        path: PathBuf,
    },

    #[error("{source_name}[{line}]: The file '{path}' could not be opened: {error}")]
    Io {
        source_name: String,
        line: usize,
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("'{}' is already included in '{key}'", path.display())]
    AlreadyIncluded { path: PathBuf, key: String },

    #[error("{source_name}[{line}]: Include depth limit of {limit} exceeded by '{}'", path.display())]
    DepthExceeded {
        source_name: String,
        line: usize,
        path: PathBuf,
        limit: usize,
    },
}

impl PreprocessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PreprocessError::UnterminatedQuote { .. } | PreprocessError::MissingFileName { .. } => {
                ErrorCategory::Syntax
            }
            PreprocessError::FileNotFound { .. }
            | PreprocessError::Io { .. }
            | PreprocessError::AlreadyIncluded { .. }
            | PreprocessError::DepthExceeded { .. } => ErrorCategory::Reference,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
