//! Parsing of the search file into search directives.
//!
//! Each meaningful line reads `<price> <keywords...>`. Lines starting with
//! `#` are comments and whitespace-only lines are ignored.

use crate::error::{Result, WatchError};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A wanted item: search keywords and the ceiling for its landed cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDirective {
    max_price: Decimal,
    keywords: String,
}

impl SearchDirective {
    /// Creates a directive. Returns `None` for a negative ceiling or empty keywords.
    pub fn new(max_price: Decimal, keywords: impl Into<String>) -> Option<Self> {
        let keywords = keywords.into();
        if max_price.is_sign_negative() || keywords.is_empty() {
            return None;
        }
        Some(Self { max_price, keywords })
    }

    /// Maximum acceptable landed cost (exclusive).
    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    /// Keywords exactly as written in the search file.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }
}

impl fmt::Display for SearchDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.max_price, self.keywords)
    }
}

impl FromStr for SearchDirective {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self> {
        parse_line(1, s)?.ok_or_else(|| WatchError::malformed(1, "line is blank or a comment"))
    }
}

/// Returns true for lines that never produce a directive.
pub fn is_skipped(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Parses one line of the search file. `line_no` is 1-based and only used in errors.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<SearchDirective>> {
    let line = line.trim_end_matches(['\n', '\r']);
    if is_skipped(line) {
        return Ok(None);
    }

    let body = line.trim_start();
    let Some(split) = body.find(char::is_whitespace) else {
        return Err(WatchError::malformed(line_no, "missing keywords after price"));
    };

    let (price_token, rest) = body.split_at(split);
    let keywords = rest.trim_start();
    if keywords.is_empty() {
        return Err(WatchError::malformed(line_no, "missing keywords after price"));
    }

    let max_price = parse_price(price_token).ok_or_else(|| {
        WatchError::malformed(
            line_no,
            format!("price \"{}\" is not a non-negative decimal number", price_token),
        )
    })?;

    trace!("Line {}: ceiling {} for \"{}\"", line_no, max_price, keywords);
    Ok(Some(SearchDirective { max_price, keywords: keywords.to_string() }))
}

/// Parses every line in order, stopping at the first malformed one.
pub fn parse_directives<I, S>(lines: I) -> Result<Vec<SearchDirective>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut directives = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(directive) = parse_line(idx + 1, line.as_ref())? {
            directives.push(directive);
        }
    }
    Ok(directives)
}

/// Parses a whole search document.
pub fn parse_document(text: &str) -> Result<Vec<SearchDirective>> {
    parse_directives(text.lines())
}

fn parse_price(token: &str) -> Option<Decimal> {
    let digits = token.chars().filter(char::is_ascii_digit).count();
    let dots = token.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.chars().count() {
        return None;
    }
    Decimal::from_str(token).ok()
}
