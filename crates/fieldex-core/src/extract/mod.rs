//! Field extraction module.

pub mod accumulator;
pub mod categorize;
pub mod confidence;
mod engine;
pub mod normalize;
pub mod quality;
pub mod rules;

pub use categorize::{categorize, category_for};
pub use engine::FieldMiner;
pub use normalize::normalize_field_name;
pub use quality::extraction_quality;

use crate::models::field::{ExtractionReport, FieldCandidate};

/// Trait for field extractors over raw document text.
pub trait FieldExtractor {
    /// Extract deduplicated candidates, highest confidence first.
    fn extract_fields(&self, text: &str) -> Vec<FieldCandidate>;

    /// Extract candidates and build the full report.
    fn extract_with_context(&self, text: &str, document_type: Option<&str>) -> ExtractionReport;
}
