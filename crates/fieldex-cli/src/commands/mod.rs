//! CLI subcommands and the output formatting they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod mapping;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use fieldex_core::extract::{categorize, category_for};
use fieldex_core::models::config::OutputConfig;
use fieldex_core::{Category, ExtractionReport, FieldexConfig, MappingTable};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fieldex")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FieldexConfig> {
    if let Some(path) = config_path {
        return Ok(FieldexConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(FieldexConfig::from_file(&default_path)?)
    } else {
        Ok(FieldexConfig::default())
    }
}

/// Mapping table from `--mapping`, else the configured file, else built-in.
pub fn load_mapping(config: &FieldexConfig, override_path: Option<&Path>) -> MappingTable {
    MappingTable::load_or_default(override_path.or(config.mapping.file.as_deref()))
}

/// Drop fields below `min_confidence` from the output view of a report.
pub fn retain_min_confidence(report: &mut ExtractionReport, min_confidence: f32) {
    if min_confidence <= 0.0 {
        return;
    }
    report.fields.retain(|f| f.confidence >= min_confidence);
    report.categories = categorize(&report.fields);
}

pub fn format_report(
    report: &ExtractionReport,
    format: OutputFormat,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(report, output),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_json(report: &ExtractionReport, output: &OutputConfig) -> anyhow::Result<String> {
    let mut json = serde_json::to_value(report)?;
    if !output.include_categories {
        if let Some(obj) = json.as_object_mut() {
            obj.remove("categories");
        }
    }

    if output.pretty_json {
        Ok(serde_json::to_string_pretty(&json)?)
    } else {
        Ok(serde_json::to_string(&json)?)
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["label", "value", "matched_field", "confidence", "category"])?;

    for field in &report.fields {
        wtr.write_record([
            field.label.as_str(),
            field.value.as_str(),
            field.matched_field.as_str(),
            &format!("{:.2}", field.confidence),
            category_for(&field.label, &field.value).as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    if let Some(document_type) = &report.document_type {
        let _ = writeln!(output, "Document type: {}", document_type);
    }
    let _ = writeln!(
        output,
        "Fields: {} ({} high confidence)",
        report.summary.total_fields, report.summary.high_confidence_count
    );
    let _ = writeln!(output, "Quality: {:.1}%", report.quality_score * 100.0);

    for category in Category::ALL {
        let bucket = report.categories.bucket(category);
        if bucket.is_empty() {
            continue;
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "{}:", title(category));
        for field in bucket {
            let _ = writeln!(
                output,
                "  {}: {}  [{}, {:.2}]",
                field.label, field.value, field.matched_field, field.confidence
            );
        }
    }

    output
}

fn title(category: Category) -> String {
    let name = category.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldex_core::{FieldExtractor, FieldMiner};

    fn report() -> ExtractionReport {
        FieldMiner::builtin().extract_with_context(
            "Carrier: Anthem\nPremium: $1,200.00\nNotes: x y",
            Some("spd"),
        )
    }

    #[test]
    fn test_csv_has_one_row_per_field() {
        let csv = format_csv(&report()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "label,value,matched_field,confidence,category");
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&"Premium,\"$1,200.00\",premium,0.90,financial"));
    }

    #[test]
    fn test_text_groups_by_category() {
        let text = format_text(&report());
        assert!(text.starts_with("Document type: spd\nFields: 3"));
        assert!(text.contains("Financial:\n  Premium: $1,200.00"));
        assert!(!text.contains("Coverage:"));
    }

    #[test]
    fn test_json_can_skip_categories() {
        let output = OutputConfig {
            pretty_json: false,
            include_categories: false,
        };
        let json = format_json(&report(), &output).unwrap();
        assert!(!json.contains("\"categories\""));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_min_confidence_filters_fields_and_buckets() {
        let mut report = report();
        retain_min_confidence(&mut report, 0.8);
        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.categories.len(), 2);
    }
}
