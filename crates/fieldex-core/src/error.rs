//! Error types for the fieldex-core library.
//!
//! Field extraction itself is total and never fails; these errors cover the
//! edges around it (loading tables and documents, talking to collaborators).

use std::path::PathBuf;

use thiserror::Error;

use crate::collab::Destination;

/// Main error type for the fieldex library.
#[derive(Error, Debug)]
pub enum FieldexError {
    /// Mapping table loading error.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Document text source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Promotion collaborator error.
    #[error("promotion error: {0}")]
    Promotion(#[from] PromotionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the strict mapping table loader.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping file is not a JSON object of strings.
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The mapping file parsed but holds no entries.
    #[error("mapping file {0} has no entries")]
    Empty(PathBuf),
}

/// Errors related to reading document text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// File extension is not a supported text source.
    #[error("unsupported document format: {0}")]
    Unsupported(String),

    /// Embedded PDF text could not be extracted.
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by a single promotion destination.
#[derive(Error, Debug)]
pub enum PromotionError {
    /// The destination has no configuration (URL, directory, credentials).
    #[error("{0} is not configured")]
    NotConfigured(Destination),

    /// The destination refused the batch.
    #[error("{destination} rejected the batch: {reason}")]
    Rejected {
        destination: Destination,
        reason: String,
    },

    /// I/O error while writing the batch.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The batch could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for the fieldex library.
pub type Result<T> = std::result::Result<T, FieldexError>;
