//! `Label $1,234.56` extraction.

use super::patterns::DOLLAR_PAIR;
use super::{PairExtractor, RawPair};
use crate::models::field::Strategy;

/// Extracts a dollar amount directly following a label.
///
/// The value shape is constrained by the pattern, so there is no length
/// ceiling and no false-positive filtering here.
#[derive(Debug, Default)]
pub struct DollarExtractor;

impl DollarExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PairExtractor for DollarExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Dollar
    }

    fn extract_all(&self, text: &str) -> Vec<RawPair> {
        DOLLAR_PAIR
            .captures_iter(text)
            .map(|caps| {
                let full_match = caps.get(0).unwrap();
                RawPair::new(caps[1].trim(), caps[2].trim())
                    .with_position(full_match.start(), full_match.end())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_dollar_amounts() {
        let text = "Specific Deductible $150,000.00\nAggregate Deductible   $1,200,000";
        let pairs: Vec<_> = DollarExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|p| (p.label, p.value))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Specific Deductible".to_string(), "$150,000.00".to_string()),
                ("Aggregate Deductible".to_string(), "$1,200,000".to_string()),
            ]
        );
    }

    #[test]
    fn test_amount_on_next_line() {
        let pair = DollarExtractor::new()
            .extract("Annual Premium\n$1,200.00")
            .unwrap();
        assert_eq!(pair.label, "Annual Premium");
        assert_eq!(pair.value, "$1,200.00");
    }

    #[test]
    fn test_colon_between_label_and_amount_is_not_matched() {
        assert!(DollarExtractor::new().extract("Premium: $500").is_none());
    }

    #[test]
    fn test_amount_without_label() {
        assert!(DollarExtractor::new().extract("$500 due").is_none());
    }
}
