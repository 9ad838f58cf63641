//! Handoff to promotion destinations.
//!
//! Each requested destination is tried on its own: a failing sink is
//! recorded and the rest still run. The handoff as a whole succeeds when
//! any destination does.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PromotionError;
use crate::models::field::{ExtractionReport, FieldCandidate};

/// Source text kept with a batch, in characters.
pub const SOURCE_TEXT_LIMIT: usize = 1000;

/// Where promoted fields can go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    RelationalStore,
    DocumentStore,
    Webhook,
    LocalFile,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::RelationalStore,
        Destination::DocumentStore,
        Destination::Webhook,
        Destination::LocalFile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::RelationalStore => "relational_store",
            Destination::DocumentStore => "document_store",
            Destination::Webhook => "webhook",
            Destination::LocalFile => "local_file",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relational_store" | "relational" | "sql" => Ok(Destination::RelationalStore),
            "document_store" | "document" => Ok(Destination::DocumentStore),
            "webhook" => Ok(Destination::Webhook),
            "local_file" | "file" => Ok(Destination::LocalFile),
            other => Err(format!("unknown destination: {}", other)),
        }
    }
}

/// Parse a comma-separated destination list, skipping blanks.
pub fn parse_destinations(list: &str) -> Result<Vec<Destination>, String> {
    list.split(',')
        .filter(|d| !d.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Everything a destination receives for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionBatch {
    pub doc_id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    pub fields: Vec<FieldCandidate>,
    /// First [`SOURCE_TEXT_LIMIT`] characters of the document text.
    pub source_text: String,
    pub promoted_at: DateTime<Utc>,
}

impl PromotionBatch {
    /// Build a batch from an extraction report.
    ///
    /// A missing or blank `doc_id` is replaced with a fresh v4 UUID.
    pub fn new(
        doc_id: Option<&str>,
        filename: impl Into<String>,
        report: &ExtractionReport,
        source_text: &str,
    ) -> Self {
        let doc_id = match doc_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        Self {
            doc_id,
            filename: filename.into(),
            document_type: report.document_type.clone(),
            fields: report.fields.clone(),
            source_text: source_text.chars().take(SOURCE_TEXT_LIMIT).collect(),
            promoted_at: Utc::now(),
        }
    }
}

/// Acknowledgement from a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionReceipt {
    pub destination: Destination,
    /// Row id, document path or URL, when the destination reports one.
    pub location: Option<String>,
    pub records: usize,
}

/// A promotion destination.
pub trait PromotionSink: Send + Sync {
    fn destination(&self) -> Destination;

    fn promote(&self, batch: &PromotionBatch) -> Result<PromotionReceipt, PromotionError>;
}

/// What happened at one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionOutcome {
    pub destination: Destination,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PromotionReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-destination outcomes for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionReport {
    pub doc_id: String,
    pub filename: String,
    pub field_count: usize,
    pub outcomes: Vec<PromotionOutcome>,
}

impl PromotionReport {
    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(|o| o.success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &PromotionOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    /// Human-readable summary, one line per destination.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Document: {}", self.filename),
            format!("Doc ID: {}", self.doc_id),
            format!("Fields: {}", self.field_count),
            "Results:".to_string(),
        ];
        for outcome in &self.outcomes {
            let mark = if outcome.success { "ok" } else { "failed" };
            let detail = match (&outcome.receipt, &outcome.error) {
                (Some(receipt), _) => receipt
                    .location
                    .clone()
                    .unwrap_or_else(|| format!("{} records", receipt.records)),
                (None, Some(error)) => error.clone(),
                (None, None) => String::new(),
            };
            lines.push(format!("  [{}] {}: {}", mark, outcome.destination, detail));
        }
        lines.join("\n")
    }
}

/// Send `batch` to every requested destination.
///
/// Destinations with no registered sink are recorded as failures.
pub fn promote_all(
    batch: &PromotionBatch,
    sinks: &[Box<dyn PromotionSink>],
    destinations: &[Destination],
) -> PromotionReport {
    info!(
        "Promoting {} fields of {} to {} destination(s)",
        batch.fields.len(),
        batch.doc_id,
        destinations.len()
    );

    let outcomes = destinations
        .iter()
        .map(|&destination| {
            let Some(sink) = sinks.iter().find(|s| s.destination() == destination) else {
                warn!("Unknown destination: {}", destination);
                return PromotionOutcome {
                    destination,
                    success: false,
                    receipt: None,
                    error: Some(format!("unknown destination: {}", destination)),
                };
            };

            match sink.promote(batch) {
                Ok(receipt) => PromotionOutcome {
                    destination,
                    success: true,
                    receipt: Some(receipt),
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to promote to {}: {}", destination, e);
                    PromotionOutcome {
                        destination,
                        success: false,
                        receipt: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    PromotionReport {
        doc_id: batch.doc_id.clone(),
        filename: batch.filename.clone(),
        field_count: batch.fields.len(),
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{FieldExtractor, FieldMiner};
    use pretty_assertions::assert_eq;

    struct Accepting(Destination);

    impl PromotionSink for Accepting {
        fn destination(&self) -> Destination {
            self.0
        }

        fn promote(&self, batch: &PromotionBatch) -> Result<PromotionReceipt, PromotionError> {
            Ok(PromotionReceipt {
                destination: self.0,
                location: None,
                records: batch.fields.len(),
            })
        }
    }

    struct Unconfigured(Destination);

    impl PromotionSink for Unconfigured {
        fn destination(&self) -> Destination {
            self.0
        }

        fn promote(&self, _batch: &PromotionBatch) -> Result<PromotionReceipt, PromotionError> {
            Err(PromotionError::NotConfigured(self.0))
        }
    }

    fn batch(doc_id: Option<&str>, text: &str) -> PromotionBatch {
        let report = FieldMiner::builtin().extract_with_context(text, Some("stop_loss"));
        PromotionBatch::new(doc_id, "policy.txt", &report, text)
    }

    #[test]
    fn test_failure_does_not_abort_siblings() {
        let sinks: Vec<Box<dyn PromotionSink>> = vec![
            Box::new(Unconfigured(Destination::RelationalStore)),
            Box::new(Accepting(Destination::LocalFile)),
        ];
        let batch = batch(Some("doc-1"), "Carrier: Anthem\nPremium: $1,200.00");

        let report = promote_all(
            &batch,
            &sinks,
            &[Destination::RelationalStore, Destination::Webhook, Destination::LocalFile],
        );

        assert!(report.any_succeeded());
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.failures().count(), 2);
        assert_eq!(
            report.outcomes[1].error.as_deref(),
            Some("unknown destination: webhook")
        );
        assert_eq!(report.outcomes[2].receipt.as_ref().map(|r| r.records), Some(2));
        assert!(report.summary().contains("[ok] local_file: 2 records"));
    }

    #[test]
    fn test_all_failed() {
        let sinks: Vec<Box<dyn PromotionSink>> =
            vec![Box::new(Unconfigured(Destination::Webhook))];
        let report = promote_all(&batch(Some("doc-2"), "Carrier: Anthem"), &sinks, &[Destination::Webhook]);
        assert!(!report.any_succeeded());
        assert_eq!(
            report.outcomes[0].error.as_deref(),
            Some("webhook is not configured")
        );
    }

    #[test]
    fn test_batch_fills_doc_id_and_truncates_text() {
        let text = format!("Carrier: Anthem\n{}", "é".repeat(2000));
        let batch = batch(None, &text);

        assert!(Uuid::parse_str(&batch.doc_id).is_ok());
        assert_eq!(batch.source_text.chars().count(), SOURCE_TEXT_LIMIT);
        assert_eq!(batch.document_type.as_deref(), Some("stop_loss"));
    }

    #[test]
    fn test_parse_destinations() {
        assert_eq!(
            parse_destinations("local_file, webhook,").unwrap(),
            vec![Destination::LocalFile, Destination::Webhook]
        );
        assert!(parse_destinations("local_file,ftp").is_err());
    }
}
