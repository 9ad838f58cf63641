//! Whitespace-aligned table row extraction.

use super::patterns::TABLE_CELL_GAP;
use super::{PairExtractor, RawPair, char_len};
use crate::models::field::Strategy;

/// Extracts two-cell rows such as `Carrier        Blue Shield`.
pub struct TableExtractor {
    min_label_len: usize,
    max_value_len: usize,
}

impl TableExtractor {
    /// Labels of at least 3 characters, values under 100 characters.
    pub fn new() -> Self {
        Self {
            min_label_len: 3,
            max_value_len: 100,
        }
    }

    /// Set the shortest accepted label, in characters.
    pub fn with_min_label_len(mut self, min_label_len: usize) -> Self {
        self.min_label_len = min_label_len;
        self
    }

    /// Values must be strictly shorter than this, in characters.
    pub fn with_max_value_len(mut self, max_value_len: usize) -> Self {
        self.max_value_len = max_value_len;
        self
    }

    fn parse_row(&self, line: &str) -> Option<RawPair> {
        let cells: Vec<&str> = TABLE_CELL_GAP.split(line.trim()).collect();
        let [label, value] = cells.as_slice() else {
            return None;
        };

        if label.is_empty() || value.is_empty() {
            return None;
        }
        if char_len(label) < self.min_label_len || char_len(value) >= self.max_value_len {
            return None;
        }

        Some(RawPair::new(*label, *value))
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PairExtractor for TableExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Table
    }

    fn extract_all(&self, text: &str) -> Vec<RawPair> {
        let mut results = Vec::new();
        let mut offset = 0;

        for line in text.split('\n') {
            if let Some(pair) = self.parse_row(line) {
                results.push(pair.with_position(offset, offset + line.len()));
            }
            offset += line.len() + 1;
        }

        results
    }
}
