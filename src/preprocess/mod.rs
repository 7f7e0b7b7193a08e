// ABOUTME: Directive preprocessing for DSL documents
// ABOUTME: Strips line comments and expands `#include` directives before resolution

pub mod context;
pub mod directive;
pub mod error;
pub mod processor;

pub use context::IncludeContext;
pub use directive::{parse_include, split_comment, IncludeDirective};
pub use error::{PreprocessError, Result};
pub use processor::{PreprocessConfig, Preprocessed, Preprocessor, DEFAULT_MAX_INCLUDE_DEPTH};
