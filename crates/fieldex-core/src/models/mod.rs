//! Data models and configuration.

pub mod config;
pub mod field;

pub use config::{ExtractionConfig, FieldexConfig, MappingConfig, OutputConfig};
pub use field::{
    CategorizedFields, Category, ExtractionReport, ExtractionSummary, FieldCandidate, Strategy,
};
