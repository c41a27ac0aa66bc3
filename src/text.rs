// src/text.rs
//! Text normalization shared by every lexical signal.
//!
//! Documents and queries must go through the same `tokenize` or BM25 scores
//! are meaningless.

use once_cell::sync::Lazy;
use regex::Regex;

// Unicode alphanumerics (`char::is_alphanumeric` equivalent).
static RE_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+").expect("alnum token regex"));

/// Lower-case alphanumeric tokens, split on any run of other characters.
pub fn tokenize(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    RE_ALNUM
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Trim + lowercase, the comparison form used by attribute scorers.
pub fn fold(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Split a comma-separated term list into folded, non-empty terms.
pub fn split_terms(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(fold)
        .filter(|t| !t.is_empty())
        .collect()
}
