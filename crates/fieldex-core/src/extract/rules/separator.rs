//! `Label = value` and `Label - value` extraction.

use super::patterns::SEPARATOR_PAIR;
use super::{PairExtractor, RawPair, char_len, is_false_positive};
use crate::models::field::Strategy;

/// Equals/dash-separated key/value extractor.
///
/// A dash only separates when surrounded by spaces; `Stop-Loss` and
/// `ABC-123` stay whole.
pub struct SeparatorExtractor {
    max_value_len: usize,
}

impl SeparatorExtractor {
    /// Create an extractor with the default 200-character value ceiling.
    pub fn new() -> Self {
        Self { max_value_len: 200 }
    }

    /// Set the longest accepted value, in characters.
    pub fn with_max_value_len(mut self, max_value_len: usize) -> Self {
        self.max_value_len = max_value_len;
        self
    }
}

impl Default for SeparatorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PairExtractor for SeparatorExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Separator
    }

    fn extract_all(&self, text: &str) -> Vec<RawPair> {
        let mut results = Vec::new();

        for caps in SEPARATOR_PAIR.captures_iter(text) {
            let label = caps[1].trim();
            let value = caps[2].trim();

            if char_len(value) > self.max_value_len || is_false_positive(value) {
                continue;
            }

            let full_match = caps.get(0).unwrap();
            results.push(
                RawPair::new(label, value).with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}
