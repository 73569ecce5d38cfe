//! HTML parsing and text extraction
//!
//! This module turns fetched page bodies into the ordered list of element texts
//! matched by a single CSS selector.

pub mod selectors;

use scraper::{Html, Selector};

use crate::utils::error::ParseError;
use crate::utils::normalize_whitespace;

/// Compiled selector plus the source string it came from
#[derive(Debug, Clone)]
pub struct TextExtractor {
    selector: Selector,
    source: String,
}

impl TextExtractor {
    /// Compile a selector
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSelector` if the selector does not compile
    pub fn new(selector: &str) -> Result<Self, ParseError> {
        let compiled = match selectors::precompiled(selector) {
            Some(compiled) => compiled.clone(),
            None => Selector::parse(selector).map_err(|e| ParseError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("{e:?}"),
            })?,
        };

        Ok(Self {
            selector: compiled,
            source: selector.to_string(),
        })
    }

    /// The selector string this extractor was built from
    pub fn selector(&self) -> &str {
        &self.source
    }

    /// Extract at most `limit` texts, keeping the first ones in document order
    ///
    /// Each text is the element's concatenated text nodes with whitespace
    /// collapsed. An empty result is not an error.
    pub fn extract_first(&self, html: &str, limit: usize) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .take(limit)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .collect()
    }
}
