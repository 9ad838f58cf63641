//! Labeled date extraction.

use super::patterns::LABELED_DATES;
use super::{PairExtractor, RawPair};
use crate::models::field::Strategy;

/// Searches for known date labels followed by a date.
///
/// Labels are matched case-insensitively and stored title-cased
/// (`EFFECTIVE DATE 1/1/24` yields label `Effective Date`). Matches are
/// returned label by label, and within a label shape by shape.
#[derive(Debug, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PairExtractor for DateExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Date
    }

    fn extract_all(&self, text: &str) -> Vec<RawPair> {
        let mut results = Vec::new();

        for (label, shapes) in LABELED_DATES.iter() {
            let title = title_case(label);
            for shape in shapes {
                for caps in shape.captures_iter(text) {
                    let full_match = caps.get(0).unwrap();
                    results.push(
                        RawPair::new(title.clone(), caps[1].trim())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Uppercase the first letter of every word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(text: &str) -> Vec<(String, String)> {
        DateExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|p| (p.label, p.value))
            .collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("effective date"), "Effective Date");
        assert_eq!(title_case("END DATE"), "End Date");
    }

    #[test]
    fn test_extract_each_shape() {
        let text = "EFFECTIVE DATE: 01/15/2024\nrenewal date - 2025-01-15\nTermination Date Dec 31, 2025";
        assert_eq!(
            pairs(text),
            vec![
                ("Effective Date".to_string(), "01/15/2024".to_string()),
                ("Renewal Date".to_string(), "2025-01-15".to_string()),
                ("Termination Date".to_string(), "Dec 31, 2025".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_month_names_and_case() {
        assert_eq!(
            pairs("Issue Date = january 5 2024"),
            vec![("Issue Date".to_string(), "january 5 2024".to_string())]
        );
    }

    #[test]
    fn test_label_must_start_at_word_boundary() {
        assert!(pairs("Weekend date 01/01/2024").is_empty());
    }

    #[test]
    fn test_label_order_beats_text_order() {
        let text = "End Date: 12/31/2024\nStart Date: 01/01/2024";
        let labels: Vec<_> = pairs(text).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Start Date".to_string(), "End Date".to_string()]);
    }

    #[test]
    fn test_no_date_after_label() {
        assert!(pairs("Effective Date: upon approval").is_empty());
    }
}
