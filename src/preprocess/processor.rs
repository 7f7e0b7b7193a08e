// ABOUTME: Directive preprocessor that strips comments and expands `#include` directives
// ABOUTME: Recursively preprocesses included files while tracking inclusions per run

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::context::IncludeContext;
use super::directive::{parse_include, split_comment, DirectiveSyntax};
use super::error::PreprocessError;
use crate::document::{Document, DocumentOrigin};

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;
const NEWLINE: char = '\n';

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Directory that includes inside inline documents resolve against
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,
}

fn default_max_include_depth() -> usize {
    DEFAULT_MAX_INCLUDE_DEPTH
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// A preprocessed document plus every diagnostic raised while producing it
#[derive(Debug)]
pub struct Preprocessed {
    pub document: Document,
    pub errors: Vec<PreprocessError>,
}

#[derive(Debug, Clone)]
pub struct Preprocessor {
    base_dir: PathBuf,
    max_include_depth: usize,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn from_config(config: &PreprocessConfig) -> Self {
        let mut preprocessor = Self::new().with_max_include_depth(config.max_include_depth);
        if let Some(dir) = &config.base_dir {
            preprocessor = preprocessor.with_base_dir(dir);
        }
        preprocessor
    }

    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    pub fn process(&self, document: &Document) -> Document {
        self.process_report(document).document
    }

    pub fn process_str(&self, text: &str) -> Document {
        self.process(&Document::inline(text))
    }

    /// Read and preprocess a file; only the top-level read can fail
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<Document> {
        let document = Document::from_file(path)?;
        Ok(self.process(&document))
    }

    pub fn process_report(&self, document: &Document) -> Preprocessed {
        let mut ctx = IncludeContext::new();
        let mut errors = Vec::new();
        let text = self.process_with(document, &mut ctx, 0, &mut errors);
        Preprocessed {
            document: Document::new(text, document.origin().clone()),
            errors,
        }
    }

    fn process_with(
        &self,
        document: &Document,
        ctx: &mut IncludeContext,
        depth: usize,
        errors: &mut Vec<PreprocessError>,
    ) -> String {
        let mut result = String::with_capacity(document.text().len());
        if document.is_empty() {
            return result;
        }

        let label = document.origin().label();
        for (index, raw) in document.text().lines().enumerate() {
            let line = index + 1;
            let split = split_comment(raw);

            let mut text = split.code.clone();
            if let Some(tail) = split.include_tail() {
                match self.include(document, &label, line, tail, ctx, depth, errors) {
                    Ok(Some(expansion)) => text.push_str(&expansion),
                    Ok(None) => {}
                    Err(e) => {
                        warn!("{}", e);
                        let discard = matches!(e, PreprocessError::UnterminatedQuote { .. });
                        errors.push(e);
                        if discard {
                            text.clear();
                        }
                    }
                }
            }

            result.push_str(&text);
            result.push(NEWLINE);
        }

        result
    }

    /// Expand one include directive. `Ok(None)` means the inclusion was skipped.
    #[allow(clippy::too_many_arguments)]
    fn include(
        &self,
        document: &Document,
        label: &str,
        line: usize,
        tail: &str,
        ctx: &mut IncludeContext,
        depth: usize,
        errors: &mut Vec<PreprocessError>,
    ) -> Result<Option<String>, PreprocessError> {
        let directive = parse_include(tail).map_err(|syntax| match syntax {
            DirectiveSyntax::Unterminated => PreprocessError::UnterminatedQuote {
                source_name: label.to_string(),
                line,
            },
            DirectiveSyntax::MissingFileName => PreprocessError::MissingFileName {
                source_name: label.to_string(),
                line,
            },
        })?;

        if !directive.ignored.is_empty() {
            warn!(
                "{}[{}]: Ignored elements:\n{}",
                label,
                line,
                directive.ignored.join("\n")
            );
        }

        let path = self.resolve_path(document.origin(), &directive.file_name);
        if !path.exists() {
            return Err(PreprocessError::FileNotFound {
                source_name: label.to_string(),
                line,
                path,
            });
        }

        if depth + 1 > self.max_include_depth {
            return Err(PreprocessError::DepthExceeded {
                source_name: label.to_string(),
                line,
                path,
                limit: self.max_include_depth,
            });
        }

        let included = Document::from_file(&path).map_err(|error| PreprocessError::Io {
            source_name: label.to_string(),
            line,
            path: path.display().to_string(),
            error,
        })?;

        let key = IncludeContext::key(label, line);
        if !ctx.record(&path, &key) {
            let e = PreprocessError::AlreadyIncluded { path, key };
            warn!("{}", e);
            errors.push(e);
            return Ok(None);
        }

        debug!("Including '{}' from {}", path.display(), key);
        let mut expansion = self.process_with(&included, ctx, depth + 1, errors);
        expansion.push(NEWLINE);
        Ok(Some(expansion))
    }

    fn resolve_path(&self, origin: &DocumentOrigin, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match origin {
            DocumentOrigin::File(_) => origin
                .directory()
                .map(|dir| dir.join(path))
                .unwrap_or_else(|| path.to_path_buf()),
            DocumentOrigin::Inline => self.base_dir.join(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_input() {
        let doc = Preprocessor::new().process_str("");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_comments_are_stripped() {
        let doc = Preprocessor::new().process_str("a # one\n# two\n  b\\#c");
        assert_eq!(doc.text(), "a \n\n  b#c\n");
    }

    #[test]
    fn test_include_is_expanded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("part.ui"), "<part/> # note\n").unwrap();

        let preprocessor = Preprocessor::new().with_base_dir(dir.path());
        let doc = preprocessor.process_str("<a>#include \"part.ui\"\n</a>");
        assert_eq!(doc.text(), "<a><part/> \n\n\n</a>\n");
    }

    #[test]
    fn test_nested_include_resolves_against_including_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/outer.ui"), "#include \"inner.ui\"").unwrap();
        fs::write(dir.path().join("sub/inner.ui"), "inner").unwrap();

        let preprocessor = Preprocessor::new().with_base_dir(dir.path());
        let report = preprocessor.process_report(&Document::inline("#include \"sub/outer.ui\""));
        assert!(report.errors.is_empty());
        assert_eq!(report.document.text(), "inner\n\n\n\n\n");
    }

    #[test]
    fn test_missing_file_keeps_prefix() {
        let dir = TempDir::new().unwrap();
        let preprocessor = Preprocessor::new().with_base_dir(dir.path());
        let report = preprocessor.process_report(&Document::inline("keep#include \"nope.ui\""));

        assert_eq!(report.document.text(), "keep\n");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            report.errors[0],
            PreprocessError::FileNotFound { line: 1, .. }
        ));
        assert_eq!(report.errors[0].category(), ErrorCategory::Reference);
    }

    #[test]
    fn test_unterminated_quote_discards_line() {
        let report = Preprocessor::new()
            .process_report(&Document::inline("first\nlost#include \"a.ui\nlast"));
        assert_eq!(report.document.text(), "first\n\nlast\n");
        assert!(matches!(
            report.errors[0],
            PreprocessError::UnterminatedQuote { line: 2, .. }
        ));
        assert_eq!(report.errors[0].to_string(), "inline[2]: Missed closed '\"'");
    }

    #[test]
    fn test_missing_file_name() {
        let report = Preprocessor::new().process_report(&Document::inline("x #include"));
        assert_eq!(report.document.text(), "x \n");
        assert_eq!(report.errors[0].category(), ErrorCategory::Syntax);
    }

    #[test]
    fn test_self_include_is_bounded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loop.ui");
        fs::write(&path, "x#include \"loop.ui\"").unwrap();

        let report = Preprocessor::new()
            .with_max_include_depth(3)
            .process_report(&Document::from_file(&path).unwrap());

        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, PreprocessError::AlreadyIncluded { .. })));
        assert!(report.document.text().starts_with("xx"));
    }

    #[test]
    fn test_depth_limit() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ui"), "a#include \"b.ui\"").unwrap();
        fs::write(dir.path().join("b.ui"), "b#include \"c.ui\"").unwrap();
        fs::write(dir.path().join("c.ui"), "c").unwrap();

        let report = Preprocessor::new()
            .with_base_dir(dir.path())
            .with_max_include_depth(2)
            .process_report(&Document::inline("#include \"a.ui\""));

        assert_eq!(report.document.text(), "ab\n\n\n\n\n");
        assert!(matches!(
            report.errors[0],
            PreprocessError::DepthExceeded { limit: 2, .. }
        ));
    }
}
