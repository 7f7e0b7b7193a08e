// ABOUTME: Template module for `{widget.property}` command substitution
// ABOUTME: Combines the command scanner with the property resolver over a widget tree

pub mod error;
pub mod scanner;

pub use error::{Result, TemplateError};
pub use scanner::{apply_bracket_substitution, resolve, scan, sentinel, Scan};

use crate::property::PropertyResolver;
use crate::widget::WidgetTree;

/// Replace every command in `template` with its value read from `tree`
pub fn resolve_template(template: &str, tree: &dyn WidgetTree) -> String {
    let resolver = PropertyResolver::new(tree);
    resolve(template, |command| resolver.resolve_or_sentinel(command))
}
