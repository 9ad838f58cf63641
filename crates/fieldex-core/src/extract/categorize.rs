//! Keyword-based categorization of candidates.

use crate::models::field::{CategorizedFields, Category, FieldCandidate};

const FINANCIAL_KEYWORDS: &[&str] = &[
    "premium",
    "deductible",
    "cost",
    "rate",
    "amount",
    "price",
    "dollar",
];
const COVERAGE_KEYWORDS: &[&str] = &["plan", "benefit", "coverage", "network", "max", "limit"];
const DATE_KEYWORDS: &[&str] = &["date", "effective", "renewal", "expiration", "termination"];
const IDENTIFIER_KEYWORDS: &[&str] = &["number", "id", "code", "contract", "policy", "group"];
const CONTACT_KEYWORDS: &[&str] = &["address", "phone", "email", "contact", "city", "state", "zip"];

/// Category for a label/value pair.
///
/// Keywords are substring matches against the lowercased label, checked in
/// category order; any value containing `$` is financial.
pub fn category_for(label: &str, value: &str) -> Category {
    let label = label.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| label.contains(kw));

    if contains_any(FINANCIAL_KEYWORDS) || value.contains('$') {
        Category::Financial
    } else if contains_any(COVERAGE_KEYWORDS) {
        Category::Coverage
    } else if contains_any(DATE_KEYWORDS) {
        Category::Dates
    } else if contains_any(IDENTIFIER_KEYWORDS) {
        Category::Identifiers
    } else if contains_any(CONTACT_KEYWORDS) {
        Category::Contact
    } else {
        Category::Other
    }
}

/// Partition candidates into categories, keeping their relative order.
pub fn categorize(fields: &[FieldCandidate]) -> CategorizedFields {
    let mut categorized = CategorizedFields::default();
    for field in fields {
        categorized
            .bucket_mut(category_for(&field.label, &field.value))
            .push(field.clone());
    }
    categorized
}
