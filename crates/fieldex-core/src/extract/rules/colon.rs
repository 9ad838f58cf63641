//! `Label: value` extraction.

use super::patterns::COLON_PAIR;
use super::{PairExtractor, RawPair, char_len, is_false_positive};
use crate::models::field::Strategy;

/// Colon-separated key/value extractor.
pub struct ColonExtractor {
    max_value_len: usize,
}

impl ColonExtractor {
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

impl Default for ColonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PairExtractor for ColonExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Colon
    }

    fn extract_all(&self, text: &str) -> Vec<RawPair> {
        let mut results = Vec::new();

        for caps in COLON_PAIR.captures_iter(text) {
            let label = caps[1].trim();
            let value = caps[2].trim();

            // Longer values are paragraphs, not fields
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(text: &str) -> Vec<(String, String)> {
        ColonExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|p| (p.label, p.value))
            .collect()
    }

    #[test]
    fn test_extract_colon_pairs() {
        let text = "Stop-Loss Deductible: $25,000\nPolicy Number : ABC-123\n";
        assert_eq!(
            pairs(text),
            vec![
                ("Stop-Loss Deductible".to_string(), "$25,000".to_string()),
                ("Policy Number".to_string(), "ABC-123".to_string()),
            ]
        );
    }

    #[test]
    fn test_label_does_not_span_lines() {
        let text = "Summary of Benefits\nCarrier: Blue Shield";
        assert_eq!(
            pairs(text),
            vec![("Carrier".to_string(), "Blue Shield".to_string())]
        );
    }

    #[test]
    fn test_label_shapes() {
        let text = "Out-of-Pocket Max (In/Out Network): $6,000";
        assert_eq!(
            pairs(text),
            vec![(
                "Out-of-Pocket Max (In/Out Network)".to_string(),
                "$6,000".to_string()
            )]
        );
    }

    #[test]
    fn test_rejects_long_and_false_positive_values() {
        let long_value = "x".repeat(201);
        let text = format!("Notes: {}\nFooter: Page 2\nStatus: A\nTier: Gold", long_value);
        assert_eq!(pairs(&text), vec![("Tier".to_string(), "Gold".to_string())]);
    }

    #[test]
    fn test_value_ceiling_is_configurable() {
        let extractor = ColonExtractor::new().with_max_value_len(5);
        assert!(extractor.extract("Plan: Blue Shield").is_none());
        assert!(extractor.extract("Plan: Gold").is_some());
    }

    #[test]
    fn test_empty_value_is_not_a_pair() {
        assert!(pairs("Carrier:   \n").is_empty());
    }
}
