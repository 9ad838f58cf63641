//! False-positive filter for captured values.

use super::char_len;
use super::patterns::FALSE_POSITIVE_VALUE;

/// Whether `value` looks like document furniture rather than a field value.
///
/// Rejects blank values, single characters, page markers (`Page 3`,
/// `2 of 10`) and confidentiality/copyright boilerplate.
pub fn is_false_positive(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || char_len(value) == 1 {
        return true;
    }

    FALSE_POSITIVE_VALUE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_single_char() {
        assert!(is_false_positive(""));
        assert!(is_false_positive("   "));
        assert!(is_false_positive("X"));
        assert!(!is_false_positive("XY"));
    }

    #[test]
    fn test_page_markers() {
        assert!(is_false_positive("Page 3"));
        assert!(is_false_positive("page 12 continued"));
        assert!(is_false_positive("2 of 10"));
        assert!(!is_false_positive("2 of 10 plans"));
        assert!(!is_false_positive("Pages"));
    }

    #[test]
    fn test_boilerplate() {
        assert!(is_false_positive("CONFIDENTIAL - do not distribute"));
        assert!(is_false_positive("Proprietary information"));
        assert!(is_false_positive("Copyright 2024 Acme"));
        assert!(is_false_positive("All Rights Reserved"));
        assert!(!is_false_positive("Blue Shield PPO"));
        assert!(!is_false_positive("Not confidential"));
    }
}
