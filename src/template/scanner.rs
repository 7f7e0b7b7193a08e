// ABOUTME: Single-pass scanner that finds `{...}` command regions in template text
// ABOUTME: Handles `\{` escapes, unterminated commands and the `[[`/`]]` markup substitution

use tracing::warn;

use super::error::TemplateError;

pub const OPEN: char = '{';
pub const CLOSE: char = '}';
pub const ESCAPE: char = '\\';

/// Result of scanning one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub text: String,
    pub error: Option<TemplateError>,
}

/// The text written in place of a command that could not be resolved
pub fn sentinel(command: &str) -> String {
    format!("{OPEN}{command}{CLOSE}")
}

/// `[[` becomes `<` and `]]` becomes `>`, everywhere in `text`
pub fn apply_bracket_substitution(text: &str) -> String {
    text.replace("[[", "<").replace("]]", ">")
}

/// Walk `input` once, handing each command region to `resolver`.
///
/// Commands do not nest: a `{` inside a command is part of the command text.
pub fn scan<F>(input: &str, mut resolver: F) -> Scan
where
    F: FnMut(&str) -> String,
{
    let mut text = String::with_capacity(input.len());
    let mut command = String::new();
    let mut in_command = false;
    let mut escape = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE && !in_command && chars.peek() == Some(&OPEN) {
            escape = true;
            continue;
        }

        match c {
            OPEN if !in_command && !escape => {
                in_command = true;
                continue;
            }
            OPEN => escape = false,
            CLOSE if in_command => {
                in_command = false;
                text.push_str(&resolver(&command));
                command.clear();
                continue;
            }
            CLOSE => escape = false,
            _ => {}
        }

        if in_command {
            command.push(c);
        } else {
            text.push(c);
        }
    }

    let error = if in_command {
        text.push(OPEN);
        text.push_str(&command);
        Some(TemplateError::UnterminatedCommand {
            input: input.to_string(),
        })
    } else {
        None
    };

    Scan {
        text: apply_bracket_substitution(&text),
        error,
    }
}

/// Scan `input` and log any syntax error, returning only the text
pub fn resolve<F>(input: &str, resolver: F) -> String
where
    F: FnMut(&str) -> String,
{
    let scan = scan(input, resolver);
    if let Some(e) = &scan.error {
        warn!("{}", e);
    }
    scan.text
}
