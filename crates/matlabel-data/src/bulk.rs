//! Bulk text parsing and code normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{DataError, Result};

static CODE_SHAPE: Lazy<std::result::Result<Regex, regex::Error>> = Lazy::new(code_shape);

/// Alphabetic prefix, leading zeros, then the significant digits.
fn code_shape() -> std::result::Result<Regex, regex::Error> {
    Regex::new(r"^([A-Z]+)0*(\d+)")
}

/// One `code description` pair from bulk text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkEntry {
    /// Line number in the source text, starting at 1.
    pub line: usize,
    /// First whitespace-delimited token.
    pub code: String,
    /// Remainder of the line, trimmed. Empty when the line held only a code.
    pub description: String,
}

/// Split bulk text into entries, skipping blank lines.
#[must_use]
pub fn parse_bulk_lines(text: &str) -> Vec<BulkEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            let (code, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            Some(BulkEntry {
                line: index + 1,
                code: code.to_string(),
                description: rest.trim().to_string(),
            })
        })
        .collect()
}

/// Canonical form used to match operator-typed codes against stored names.
///
/// An alphabetic prefix followed by digits loses its leading zeros
/// (`vg0100` and `VG100` both become `VG100`) and anything after the digit
/// run is dropped. Other strings are only trimmed and uppercased.
///
/// # Errors
///
/// Returns [`DataError::PatternInvalid`] if the code pattern failed to compile.
pub fn normalize_code(value: &str) -> Result<String> {
    let shape = CODE_SHAPE
        .as_ref()
        .map_err(|source| DataError::PatternInvalid {
            pattern: "code_shape",
            source: source.clone(),
        })?;
    let upper = value.trim().to_uppercase();
    Ok(shape
        .captures(&upper)
        .map_or_else(|| upper.clone(), |caps| format!("{}{}", &caps[1], &caps[2])))
}
