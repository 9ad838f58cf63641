//! Multi-strategy field miner.

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::mapping::MappingTable;
use crate::models::config::ExtractionConfig;
use crate::models::field::{ExtractionReport, ExtractionSummary, FieldCandidate, Strategy};
use crate::value::ValueShape;

use super::accumulator::Accumulator;
use super::categorize::categorize;
use super::confidence::score;
use super::normalize::normalize_field_name;
use super::quality::extraction_quality;
use super::rules::{
    ColonExtractor, DateExtractor, DollarExtractor, PairExtractor, SeparatorExtractor,
    TableExtractor, is_false_positive,
};
use super::FieldExtractor;

/// Runs the five extraction strategies in order over one mapping table.
///
/// A miner holds no per-call state; one instance can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct FieldMiner {
    mapping: Arc<MappingTable>,
    config: ExtractionConfig,
}

impl FieldMiner {
    /// Create a miner over `mapping` with default settings.
    pub fn new(mapping: impl Into<Arc<MappingTable>>) -> Self {
        Self {
            mapping: mapping.into(),
            config: ExtractionConfig::default(),
        }
    }

    /// Create a miner over the built-in mapping table.
    pub fn builtin() -> Self {
        Self::new(MappingTable::builtin())
    }

    /// Set extraction limits.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Resolve, classify and score a single label/value pair.
    pub fn candidate(&self, label: &str, value: &str, strategy: Strategy) -> FieldCandidate {
        let hit = self.mapping.lookup(label);
        let matched_field = match hit {
            Some(field) => field.to_string(),
            None => normalize_field_name(label),
        };
        let shape = ValueShape::classify(value);
        let confidence = score(value, shape, hit.is_some());

        FieldCandidate {
            label: label.to_string(),
            value: value.to_string(),
            matched_field,
            confidence,
            strategy,
            shape,
        }
    }

    fn extractor(&self, strategy: Strategy) -> Box<dyn PairExtractor> {
        match strategy {
            Strategy::Colon => {
                Box::new(ColonExtractor::new().with_max_value_len(self.config.max_value_len))
            }
            Strategy::Separator => {
                Box::new(SeparatorExtractor::new().with_max_value_len(self.config.max_value_len))
            }
            Strategy::Dollar => Box::new(DollarExtractor::new()),
            Strategy::Table => Box::new(
                TableExtractor::new()
                    .with_min_label_len(self.config.min_table_label_len)
                    .with_max_value_len(self.config.max_table_value_len),
            ),
            Strategy::Date => Box::new(DateExtractor::new()),
        }
    }

    /// Run one strategy and offer its pairs to the accumulator.
    fn run_strategy(&self, strategy: Strategy, text: &str, mut acc: Accumulator) -> Accumulator {
        let pairs = self.extractor(strategy).extract_all(text);
        let found = pairs.len();

        // Colon and separator filter their own values
        let filter = self.config.uniform_false_positive_filter
            && !matches!(strategy, Strategy::Colon | Strategy::Separator);

        let mut accepted = 0;
        for pair in pairs {
            if acc.is_claimed(&pair.label) {
                continue;
            }
            if filter && is_false_positive(&pair.value) {
                continue;
            }
            if acc.offer(self.candidate(&pair.label, &pair.value, strategy)) {
                accepted += 1;
            }
        }

        debug!(
            "{} strategy: {} pairs found, {} accepted",
            strategy.as_str(),
            found,
            accepted
        );
        acc
    }
}

impl Default for FieldMiner {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldExtractor for FieldMiner {
    fn extract_fields(&self, text: &str) -> Vec<FieldCandidate> {
        if text.trim().is_empty() {
            warn!("Empty text provided for field extraction");
            return Vec::new();
        }

        // std has no clock on wasm32-unknown-unknown
        #[cfg(not(target_arch = "wasm32"))]
        let start = Instant::now();

        let fields = Strategy::ORDER
            .into_iter()
            .fold(Accumulator::new(), |acc, strategy| {
                self.run_strategy(strategy, text, acc)
            })
            .into_sorted();

        #[cfg(not(target_arch = "wasm32"))]
        info!(
            "Extracted {} fields from {} characters in {:?}",
            fields.len(),
            text.chars().count(),
            start.elapsed()
        );
        #[cfg(target_arch = "wasm32")]
        info!(
            "Extracted {} fields from {} characters",
            fields.len(),
            text.chars().count()
        );
        fields
    }

    fn extract_with_context(&self, text: &str, document_type: Option<&str>) -> ExtractionReport {
        let fields = self.extract_fields(text);
        let categories = categorize(&fields);
        let quality_score = extraction_quality(&fields, &self.mapping);

        let summary = ExtractionSummary {
            total_fields: fields.len(),
            high_confidence_count: fields
                .iter()
                .filter(|f| f.is_high_confidence(self.config.high_confidence_threshold))
                .count(),
            text_length: text.chars().count(),
            line_count: text.matches('\n').count(),
        };

        ExtractionReport {
            fields,
            categories,
            document_type: document_type.map(str::to_string),
            quality_score,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_candidate_resolves_mapping_or_normalizes() {
        let miner = FieldMiner::builtin();

        let mapped = miner.candidate("Stop-Loss Deductible", "$25,000", Strategy::Colon);
        assert_eq!(mapped.matched_field, "stop_loss_deductible");
        assert_eq!(mapped.shape, ValueShape::Currency);
        assert!((mapped.confidence - 0.9).abs() < 1e-6);

        let unmapped = miner.candidate("Rx Tier (Generic)", "Tier 1", Strategy::Table);
        assert_eq!(unmapped.matched_field, "rx_tier_generic");
        assert!((unmapped.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_label_on_a_target_gets_no_mapping_bonus() {
        let miner = FieldMiner::builtin();
        let candidate = miner.candidate("Plan_Name", "Gold", Strategy::Colon);
        assert_eq!(candidate.matched_field, "plan_name");
        assert!((candidate.confidence - 0.5).abs() < 1e-6);

        let contact = miner.candidate("Contact Name", "Jane Roe", Strategy::Colon);
        assert_eq!(contact.matched_field, "contact_name");
        assert!((contact.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_filter_guards_table_rows() {
        let text = "Footer      Page 3 of 9";

        let lenient = FieldMiner::builtin();
        assert_eq!(lenient.extract_fields(text).len(), 1);

        let strict = FieldMiner::builtin().with_config(ExtractionConfig {
            uniform_false_positive_filter: true,
            ..ExtractionConfig::default()
        });
        assert!(strict.extract_fields(text).is_empty());
    }

    #[test]
    fn test_lengths_count_characters() {
        let text = "Plan Name: Caf\u{e9} \u{dc}ni\u{f6}n";
        let report = FieldMiner::builtin().extract_with_context(text, None);

        assert_eq!(report.fields[0].value, "Caf\u{e9} \u{dc}ni\u{f6}n");
        assert_eq!(report.summary.text_length, 21);
        assert!(text.len() > 21);
    }

    #[test]
    fn test_strategy_is_recorded() {
        let miner = FieldMiner::builtin();
        let fields = miner.extract_fields("Carrier: Anthem\nBroker = Marsh\nPremium $1,200.00");
        let strategies: Vec<_> = fields.iter().map(|f| (f.label.as_str(), f.strategy)).collect();

        assert!(strategies.contains(&("Carrier", Strategy::Colon)));
        assert!(strategies.contains(&("Broker", Strategy::Separator)));
        assert!(strategies.contains(&("Premium", Strategy::Dollar)));
    }
}
