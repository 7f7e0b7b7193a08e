// ABOUTME: Diagnostic categories shared by every error type in the crate
// ABOUTME: Groups preprocessing, resolution, binding and process failures into one taxonomy

use std::fmt;

/// Broad classification of a recovered diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input text: unterminated commands or quoted file names
    Syntax,
    /// A named widget, property or include file could not be found or read
    Reference,
    /// A property kind or composite element that has no textual form
    Type,
    /// An invalid trigger declaration
    Binding,
    /// An external command that failed to run or produced nothing usable
    Process,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Reference => "reference",
            ErrorCategory::Type => "type",
            ErrorCategory::Binding => "binding",
            ErrorCategory::Process => "process",
        };
        f.write_str(name)
    }
}
