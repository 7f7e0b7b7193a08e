// ABOUTME: Error types for command template scanning
// ABOUTME: Defines syntax errors found while walking `{...}` command regions

use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Could not find '}}' in command '{input}'")]
    UnterminatedCommand { input: String },
}

impl TemplateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TemplateError::UnterminatedCommand { .. } => ErrorCategory::Syntax,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
