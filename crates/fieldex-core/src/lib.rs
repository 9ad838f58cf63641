//! Core library for mining structured field candidates from OCR text.
//!
//! This crate provides:
//! - Rule-based label/value extraction (colon, separator, dollar, table, date)
//! - Label to schema field mapping with a built-in benefits-document table
//! - Confidence scoring, categorization and overall extraction quality
//! - Document text sources (plain text, OCR output, PDF text layer)
//! - Handoff types for validators and promotion destinations

pub mod collab;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod models;
pub mod source;
pub mod value;

pub use collab::{
    Destination, FieldValidator, PromotionBatch, PromotionReport, PromotionSink, RequiredFields,
    Severity, ValidationReport, promote_all, validation_input,
};
pub use error::{FieldexError, MappingError, PromotionError, Result, SourceError};
pub use extract::{FieldExtractor, FieldMiner, normalize_field_name};
pub use mapping::{MappingTable, SharedMappingTable};
pub use models::config::FieldexConfig;
pub use models::field::{
    CategorizedFields, Category, ExtractionReport, ExtractionSummary, FieldCandidate, Strategy,
};
pub use source::{DocumentText, SourceKind};
pub use value::{TypedValue, ValueShape};

/// Mine candidates from `text` with the built-in mapping table.
pub fn extract_fields(text: &str) -> Vec<FieldCandidate> {
    FieldMiner::builtin().extract_fields(text)
}
