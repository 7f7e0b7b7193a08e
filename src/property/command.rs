// ABOUTME: Dotted command paths such as `edit.text` or `geometry.rect.width`
// ABOUTME: Splits command text into widget, property and element tokens without validating them

use crate::template::sentinel;

/// Separator between command tokens
pub const SEPARATOR: char = '.';

/// A parsed `widget.property[.element]` reference.
///
/// The raw text is kept so a failing command can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    raw: String,
    tokens: Vec<String>,
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let tokens = text
            .split(SEPARATOR)
            .map(|token| token.trim().to_string())
            .collect();

        Self {
            raw: text.to_string(),
            tokens,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn widget(&self) -> Option<&str> {
        self.token(0)
    }

    pub fn property(&self) -> Option<&str> {
        self.token(1)
    }

    /// Sub-element of a composite property; extra tokens after it are ignored
    pub fn element(&self) -> Option<&str> {
        self.token(2)
    }

    /// Tokens after the property name, in order
    pub fn elements(&self) -> &[String] {
        self.tokens.get(2..).unwrap_or(&[])
    }

    /// The raw command wrapped back in its markers
    pub fn sentinel(&self) -> String {
        sentinel(&self.raw)
    }

    fn token(&self, index: usize) -> Option<&str> {
        self.tokens
            .get(index)
            .map(String::as_str)
            .filter(|token| !token.is_empty())
    }
}
