// ABOUTME: Error types for trigger binding and external process execution
// ABOUTME: Defines the process failure taxonomy and the diagnostics logged for failed runs

use std::fmt;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Why an external process could not deliver its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessFailure {
    FailedToStart,
    /// Killed by a signal
    Crashed,
    Timeout,
    /// Writing to stdin failed. The runner closes stdin, so only hosts that
    /// feed input themselves report this.
    WriteError,
    ReadError,
    UnknownError,
}

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProcessFailure::FailedToStart => "Failed to start",
            ProcessFailure::Crashed => "Crashed",
            ProcessFailure::Timeout => "Timeout",
            ProcessFailure::WriteError => "Write error",
            ProcessFailure::ReadError => "Read error",
            ProcessFailure::UnknownError => "Unknown error",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Could not execute ({failure}): '{command}'")]
    Failed {
        failure: ProcessFailure,
        command: String,
    },

    #[error("Process has been crashed: '{command}'")]
    Crashed { command: String },

    #[error("Could not execute (exitcode: {code}): '{command}'")]
    NonZeroExit { code: i32, command: String },

    #[error("No data returned: '{command}'")]
    NoData { command: String },
}

impl ProcessError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Process
    }

    pub fn command(&self) -> &str {
        match self {
            ProcessError::Failed { command, .. }
            | ProcessError::Crashed { command }
            | ProcessError::NonZeroExit { command, .. }
            | ProcessError::NoData { command } => command,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("{object}::{event}: Unsupported action '{action}'")]
    UnsupportedAction {
        object: String,
        event: String,
        action: String,
    },

    #[error("{object}::{event}: Trigger already exists: '{command}'")]
    DuplicateTrigger {
        object: String,
        event: String,
        command: String,
    },

    #[error("Object name is not provided for event '{event}'")]
    MissingObjectName { event: String },

    #[error("{object}: Event name is not provided")]
    MissingEventName { object: String },

    #[error("{object}::{event}: Command is not provided")]
    MissingCommand { object: String, event: String },

    #[error("Could not find object by name '{object}'")]
    ObjectNotFound { object: String },

    #[error("No trigger is bound to {object}::{event}")]
    TriggerNotFound { object: String, event: String },
}

impl BindingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BindingError::ObjectNotFound { .. } | BindingError::TriggerNotFound { .. } => {
                ErrorCategory::Reference
            }
            _ => ErrorCategory::Binding,
        }
    }
}

pub type Result<T> = std::result::Result<T, BindingError>;
