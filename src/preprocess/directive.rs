// ABOUTME: Line-level lexing for the preprocessor: comment stripping and `#include` parsing
// ABOUTME: Extracts the quoted file name and collects any stray text around it

pub const COMMENT: char = '#';
pub const INCLUDE: &str = "#include";
pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';

/// A line split at its first unescaped comment marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    /// Text before the marker, with `\#` unescaped
    pub code: String,
    /// Everything from the marker to end of line
    pub comment: Option<&'a str>,
}

impl SplitLine<'_> {
    /// Text following the include keyword, if the comment is an include directive
    pub fn include_tail(&self) -> Option<&str> {
        self.comment.and_then(|c| c.strip_prefix(INCLUDE))
    }
}

pub fn split_comment(line: &str) -> SplitLine<'_> {
    let mut code = String::with_capacity(line.len());
    let mut chars = line.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c == ESCAPE {
            if let Some(&(_, COMMENT)) = chars.peek() {
                chars.next();
                code.push(COMMENT);
                continue;
            }
        }
        if c == COMMENT {
            return SplitLine {
                code,
                comment: Some(&line[pos..]),
            };
        }
        code.push(c);
    }

    SplitLine {
        code,
        comment: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub file_name: String,
    /// Stray text found before the opening or after the closing quote
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveSyntax {
    Unterminated,
    MissingFileName,
}

/// Parse the text following `#include`
pub fn parse_include(tail: &str) -> Result<IncludeDirective, DirectiveSyntax> {
    let mut reading = false;
    let mut file_name = String::new();
    let mut before = String::new();
    let mut after = None;

    for (pos, c) in tail.char_indices() {
        if c == QUOTE {
            reading = !reading;
            if !reading {
                let rest = tail[pos + c.len_utf8()..].trim();
                if !rest.is_empty() {
                    after = Some(rest.to_string());
                }
                break;
            }
            continue;
        }

        if reading {
            file_name.push(c);
        } else if !c.is_whitespace() {
            before.push(c);
        }
    }

    if reading {
        return Err(DirectiveSyntax::Unterminated);
    }
    if file_name.is_empty() {
        return Err(DirectiveSyntax::MissingFileName);
    }

    let ignored = std::iter::once(before)
        .filter(|b| !b.is_empty())
        .chain(after)
        .collect();

    Ok(IncludeDirective { file_name, ignored })
}
