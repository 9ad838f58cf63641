//! Whole-document extraction quality.

use crate::mapping::MappingTable;
use crate::models::field::FieldCandidate;

/// Overall quality of an extraction, in `[0.0, 1.0]`.
///
/// Mean confidence, plus up to 0.2 for volume (one hundredth per field)
/// and up to 0.2 for the share of candidates resolved to mapping targets.
/// An empty list scores 0.0.
pub fn extraction_quality(fields: &[FieldCandidate], mapping: &MappingTable) -> f32 {
    if fields.is_empty() {
        return 0.0;
    }

    let count = fields.len() as f32;
    let avg_confidence = fields.iter().map(|f| f.confidence).sum::<f32>() / count;
    let field_count_bonus = (count / 100.0).min(0.2);

    let matched_count = fields
        .iter()
        .filter(|f| mapping.is_target(&f.matched_field))
        .count() as f32;
    let matched_bonus = (matched_count / count).min(0.2);

    (avg_confidence + field_count_bonus + matched_bonus).min(1.0)
}
