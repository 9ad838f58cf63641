//! Extract command - mine fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use fieldex_core::{
    Destination, DocumentText, FieldExtractor, FieldMiner, FieldValidator, PromotionBatch,
    PromotionSink, RequiredFields, promote_all, validation_input,
};
use fieldex_core::collab::parse_destinations;

use super::{OutputFormat, format_report, load_config, load_mapping, retain_min_confidence};
use crate::sink::JsonDirSink;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (.txt, .text, .md, .ocr or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document type recorded in the report (e.g. stop_loss, spd)
    #[arg(long)]
    doc_type: Option<String>,

    /// Mapping table JSON file
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Hide fields below this confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Canonical fields that must be present, comma-separated
    #[arg(long, value_delimiter = ',')]
    require: Vec<String>,

    /// Promote the extracted fields as JSON into this directory
    #[arg(long)]
    promote_dir: Option<PathBuf>,

    /// Promotion destinations, comma-separated (default: local_file)
    #[arg(long)]
    destinations: Option<String>,

    /// Document id used for promotion (default: random UUID)
    #[arg(long)]
    doc_id: Option<String>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let doc = DocumentText::from_path(&args.input)?;

    pb.set_message("Extracting fields...");
    let mapping = load_mapping(&config, args.mapping.as_deref());
    let miner = FieldMiner::new(mapping).with_config(config.extraction.clone());
    let mut report = miner.extract_with_context(&doc.text, args.doc_type.as_deref());

    pb.finish_and_clear();

    let mut missing = 0;
    if !args.require.is_empty() {
        let validator = RequiredFields::new(args.require.iter().map(|f| f.trim().to_string()));
        let schema_id = args.doc_type.as_deref().unwrap_or("default");
        let validation = validator.validate(&validation_input(&report.fields), schema_id);

        if !validation.errors.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &validation.errors {
                eprintln!("  - {}", issue.message);
            }
        }
        missing = validation.errors.len();
    }

    if args.promote_dir.is_some() || args.destinations.is_some() {
        let destinations = match &args.destinations {
            Some(list) => parse_destinations(list).map_err(|e| anyhow::anyhow!(e))?,
            None => vec![Destination::LocalFile],
        };

        // Only the local directory sink is available from the command line
        let mut sinks: Vec<Box<dyn PromotionSink>> = Vec::new();
        if let Some(dir) = &args.promote_dir {
            sinks.push(Box::new(
                JsonDirSink::new(dir).with_pretty(config.output.pretty_json),
            ));
        }

        let batch = PromotionBatch::new(args.doc_id.as_deref(), doc.file_name(), &report, &doc.text);
        let promotion = promote_all(&batch, &sinks, &destinations);

        eprintln!("{}", promotion.summary());
        if !promotion.any_succeeded() {
            anyhow::bail!("Promotion failed for {}", batch.doc_id);
        }
    }

    let min_confidence = args.min_confidence.unwrap_or(config.extraction.min_confidence);
    retain_min_confidence(&mut report, min_confidence);

    let output = format_report(&report, args.format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if missing > 0 {
        anyhow::bail!("{} required field(s) missing", missing);
    }

    Ok(())
}
