//! Boundary with downstream collaborators.
//!
//! The engine hands its candidates to two kinds of consumers: validators,
//! which check canonical fields against a schema, and promotion
//! destinations, which persist or forward them.

pub mod promotion;
pub mod validation;

pub use promotion::{
    Destination, PromotionBatch, PromotionOutcome, PromotionReceipt, PromotionReport,
    PromotionSink, SOURCE_TEXT_LIMIT, parse_destinations, promote_all,
};
pub use validation::{
    FieldValidator, RequiredFields, Severity, ValidationIssue, ValidationReport, validation_input,
};
