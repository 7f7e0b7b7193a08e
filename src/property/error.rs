// ABOUTME: Error types for property resolution against a widget tree
// ABOUTME: Each variant carries the message shown to the user when a command cannot be resolved

use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Widget name is not provided in command '{command}'")]
    MissingWidgetName { command: String },

    #[error("Property name is not provided in command '{command}'")]
    MissingPropertyName { command: String },

    #[error("Could not find widget by name '{widget}'")]
    WidgetNotFound { widget: String },

    #[error("Could not take a property snapshot of widget '{widget}'")]
    SnapshotUnavailable { widget: String },

    #[error("Widget '{widget}' does not have property '{property}'")]
    PropertyNotFound { widget: String, property: String },

    #[error("{kind} element is not provided. {usage}")]
    MissingElement { kind: &'static str, usage: String },

    #[error("Unsupported {kind} element '{element}'. {usage}")]
    UnsupportedElement {
        kind: &'static str,
        element: String,
        usage: String,
    },

    #[error("Type of property '{property}' is not supported ({kind})")]
    UnsupportedKind {
        property: String,
        kind: &'static str,
    },
}

impl ResolveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResolveError::MissingWidgetName { .. } | ResolveError::MissingPropertyName { .. } => {
                ErrorCategory::Syntax
            }
            ResolveError::WidgetNotFound { .. }
            | ResolveError::SnapshotUnavailable { .. }
            | ResolveError::PropertyNotFound { .. } => ErrorCategory::Reference,
            ResolveError::MissingElement { .. }
            | ResolveError::UnsupportedElement { .. }
            | ResolveError::UnsupportedKind { .. } => ErrorCategory::Type,
        }
    }

    /// Usage text listing the legal elements, for element errors
    pub fn usage(&self) -> Option<&str> {
        match self {
            ResolveError::MissingElement { usage, .. }
            | ResolveError::UnsupportedElement { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
