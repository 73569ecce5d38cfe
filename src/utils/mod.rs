//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Strip the anti-XSSI guard some JSON endpoints prepend to their bodies
///
/// Returns the slice starting at the first `{`, or the input unchanged if
/// there is none.
pub fn strip_json_guard(body: &str) -> &str {
    body.find('{').map_or(body, |idx| &body[idx..])
}

/// Escape the characters that break a Markdown table cell
pub fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
