//! Label to snake_case field name normalization.

use super::rules::patterns::{LABEL_SEPARATOR_RUN, NON_LABEL_CHARS};

/// Convert a raw label into a snake_case identifier.
///
/// Drops everything but word characters, whitespace and hyphens, turns
/// whitespace/hyphen runs into single underscores, lowercases, and trims
/// underscores from both ends.
pub fn normalize_field_name(label: &str) -> String {
    let cleaned = NON_LABEL_CHARS.replace_all(label, "");
    let joined = LABEL_SEPARATOR_RUN.replace_all(&cleaned, "_");
    joined.to_lowercase().trim_matches('_').to_string()
}
