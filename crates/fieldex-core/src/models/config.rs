//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FieldexError;

/// Main configuration for fieldex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Mapping table source.
    pub mapping: MappingConfig,

    /// Output formatting.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Longest accepted value (characters) for the colon and equals/dash strategies.
    pub max_value_len: usize,

    /// Table rows are accepted only when the value is shorter than this.
    pub max_table_value_len: usize,

    /// Shortest accepted table label (characters).
    pub min_table_label_len: usize,

    /// Confidence at or above which a candidate counts as high confidence.
    pub high_confidence_threshold: f32,

    /// Run the false-positive filter for the dollar, table and date
    /// strategies too, not only colon and equals/dash.
    pub uniform_false_positive_filter: bool,

    /// Minimum confidence for candidates shown by the CLI.
    pub min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_value_len: 200,
            max_table_value_len: 100,
            min_table_label_len: 3,
            high_confidence_threshold: 0.8,
            uniform_false_positive_filter: false,
            min_confidence: 0.0,
        }
    }
}

/// Where the mapping table comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// JSON mapping file. The built-in table is used when unset or unreadable.
    pub file: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Include the categorized buckets in JSON output.
    pub include_categories: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            include_categories: true,
        }
    }
}

impl FieldexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, FieldexError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FieldexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), FieldexError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FieldexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_extraction_heuristics() {
        let config = ExtractionConfig::default();
        assert_eq!(config.max_value_len, 200);
        assert_eq!(config.max_table_value_len, 100);
        assert_eq!(config.min_table_label_len, 3);
        assert_eq!(config.high_confidence_threshold, 0.8);
        assert!(!config.uniform_false_positive_filter);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: FieldexConfig =
            serde_json::from_str(r#"{"extraction": {"max_value_len": 50}}"#).unwrap();
        assert_eq!(config.extraction.max_value_len, 50);
        assert_eq!(config.extraction.max_table_value_len, 100);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FieldexConfig::default();
        config.mapping.file = Some(PathBuf::from("mapping.json"));
        config.save(&path).unwrap();

        assert_eq!(FieldexConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FieldexConfig::from_file(&path),
            Err(FieldexError::Config(_))
        ));
    }
}
