//! Rule-based key/value extractors.
//!
//! Each extractor sees the full raw text and returns `(label, value)` pairs.
//! Extractors never see each other's output; ownership of a label across
//! extractors is decided later by the accumulator.

pub mod colon;
pub mod dates;
pub mod dollar;
pub mod filter;
pub mod patterns;
pub mod separator;
pub mod table;

pub use colon::ColonExtractor;
pub use dates::DateExtractor;
pub use dollar::DollarExtractor;
pub use filter::is_false_positive;
pub use separator::SeparatorExtractor;
pub use table::TableExtractor;

use crate::models::field::Strategy;

/// Trait for label/value pair extractors.
pub trait PairExtractor {
    /// Strategy this extractor implements.
    fn strategy(&self) -> Strategy;

    /// Extract every pair found in `text`, in discovery order.
    fn extract_all(&self, text: &str) -> Vec<RawPair>;

    /// First pair found in `text`.
    fn extract(&self, text: &str) -> Option<RawPair> {
        self.extract_all(text).into_iter().next()
    }
}

/// A label/value pair before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// Trimmed label.
    pub label: String,
    /// Trimmed value.
    pub value: String,
    /// Byte span of the match in the source text.
    pub position: Option<(usize, usize)>,
}

impl RawPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Number of characters in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
