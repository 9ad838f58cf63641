//! Common regex patterns for field extraction.
//!
//! Labels start with a letter and continue with word characters, spaces,
//! tabs, hyphens, slashes and parentheses. Labels never cross a line break.

use lazy_static::lazy_static;
use regex::Regex;

/// Labels the date strategy searches for, lowercase.
pub const DATE_LABELS: [&str; 8] = [
    "effective date",
    "renewal date",
    "termination date",
    "expiration date",
    "start date",
    "end date",
    "issue date",
    "anniversary date",
];

/// Date shapes the date strategy accepts after a label, in priority order.
pub const DATE_SHAPES: [&str; 3] = [
    // MM/DD/YYYY or MM-DD-YY
    r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
    // YYYY-MM-DD
    r"\d{4}[/-]\d{1,2}[/-]\d{1,2}",
    // Jan 15, 2024 / January 15 2024
    r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4}",
];

lazy_static! {
    // Key/value pairs
    pub static ref COLON_PAIR: Regex = Regex::new(
        r"([A-Za-z][\w \t\-/()]+?)[ \t]*:[ \t]*([^\n\r]+)"
    ).unwrap();

    pub static ref SEPARATOR_PAIR: Regex = Regex::new(
        r"([A-Za-z][\w \t\-/()]+?)(?:[ \t]*=[ \t]*|[ \t]+-[ \t]+)([^\n\r]+)"
    ).unwrap();

    // The amount may sit on the line after its label
    pub static ref DOLLAR_PAIR: Regex = Regex::new(
        r"([A-Za-z][\w \t\-/()]+?)\s+(\$[\d,]+(?:\.\d{2})?)"
    ).unwrap();

    // Table rows: cells separated by 2+ whitespace or tabs
    pub static ref TABLE_CELL_GAP: Regex = Regex::new(
        r"\s{2,}|\t+"
    ).unwrap();

    // Labeled dates, one regex per (label, shape) pair
    pub static ref LABELED_DATES: Vec<(&'static str, Vec<Regex>)> = DATE_LABELS
        .iter()
        .map(|label| {
            let shapes = DATE_SHAPES
                .iter()
                .map(|shape| {
                    Regex::new(&format!(
                        r"(?i)\b{}\s*[\-:=]?\s*({})",
                        regex::escape(label),
                        shape
                    ))
                    .unwrap()
                })
                .collect();
            (*label, shapes)
        })
        .collect();

    // Headers, footers and page markers that look like values
    pub static ref FALSE_POSITIVE_VALUE: Regex = Regex::new(
        r"(?i)^(?:page\s+\d+|\d+\s+of\s+\d+$|confidential|proprietary|copyright|all rights reserved)"
    ).unwrap();

    // Whole-value shapes used for scoring
    pub static ref CURRENCY_VALUE: Regex = Regex::new(
        r"^\$[\d,]+(?:\.\d{2})?$"
    ).unwrap();

    pub static ref DATE_VALUE: Regex = Regex::new(
        r"^\d{1,2}[/-]\d{1,2}[/-]\d{2,4}$"
    ).unwrap();

    pub static ref NUMBER_VALUE: Regex = Regex::new(
        r"^[\d,]+$"
    ).unwrap();

    pub static ref CODE_VALUE: Regex = Regex::new(
        r"^[A-Z0-9\-]+$"
    ).unwrap();

    // Date parsing for typed values
    pub static ref DATE_MDY: Regex = Regex::new(
        r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})$"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[/-](\d{1,2})[/-](\d{1,2})$"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2}),?\s+(\d{4})$"
    ).unwrap();

    // Label normalization
    pub static ref NON_LABEL_CHARS: Regex = Regex::new(
        r"[^\w\s\-]"
    ).unwrap();

    pub static ref LABEL_SEPARATOR_RUN: Regex = Regex::new(
        r"[\s\-]+"
    ).unwrap();
}
