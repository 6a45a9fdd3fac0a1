//! Source tokenizer.
//!
//! Splits program text into whitespace-separated terms, each tagged with its one-based line
//! and column. A backslash starts a comment running to the end of the line.

use crate::isa::SourcePos;

/// Starts a comment that runs to the end of the line.
pub const COMMENT_CHAR: char = '\\';

/// Suffix marking a label declaration (`name:`).
pub const LABEL_SUFFIX: char = ':';

/// Standalone term introducing a function label (`: name`).
pub const FUNCTION_MARKER: &str = ":";

/// Directive binding the preceding literal to a variable (`lit 5 variable x`).
pub const VARIABLE_DIRECTIVE: &str = "variable";

/// A single lexeme with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term<'a> {
    /// The lexeme.
    pub text: &'a str,
    /// Line and column of the first character.
    pub pos: SourcePos,
}

/// Tokenizes a whole program.
pub fn tokenize(source: &str) -> Vec<Term<'_>> {
    let mut out = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.find(COMMENT_CHAR).map_or(raw, |cut| &raw[..cut]);
        tokenize_line(index + 1, line, &mut out);
    }
    out
}

fn tokenize_line<'a>(line_no: usize, line: &'a str, out: &mut Vec<Term<'a>>) {
    let mut start: Option<(usize, usize)> = None;
    for (column, (i, ch)) in line.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((s, col)) = start.take() {
                out.push(Term {
                    text: &line[s..i],
                    pos: SourcePos::new(line_no, col),
                });
            }
        } else if start.is_none() {
            start = Some((i, column + 1));
        }
    }
    if let Some((s, col)) = start {
        out.push(Term {
            text: &line[s..],
            pos: SourcePos::new(line_no, col),
        });
    }
}

/// Returns the declared name if `text` is a label declaration (`name:`).
pub fn label_declaration(text: &str) -> Option<&str> {
    text.strip_suffix(LABEL_SUFFIX).filter(|name| !name.is_empty())
}

/// Returns true if `text` starts like a number (a digit, optionally after a sign).
pub fn looks_numeric(text: &str) -> bool {
    text.strip_prefix(['-', '+'])
        .unwrap_or(text)
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer with an optional sign.
pub fn parse_number(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => i128::from_str_radix(hex, 16).ok()?,
        None if body.starts_with(|c: char| c.is_ascii_digit()) => body.parse::<i128>().ok()?,
        None => return None,
    };
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}
