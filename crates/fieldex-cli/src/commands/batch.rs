//! Batch command - mine fields from many documents concurrently.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use fieldex_core::{DocumentText, ExtractionReport, FieldExtractor, FieldMiner};

use super::{OutputFormat, format_report, load_config, load_mapping};

/// Extensions picked up from the glob.
const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "text", "md", "ocr", "pdf"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Mapping table JSON file
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Document type recorded in every report
    #[arg(long)]
    doc_type: Option<String>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    output_name: String,
    report: Option<ExtractionReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One table snapshot shared by every worker
    let mapping = Arc::new(load_mapping(&config, args.mapping.as_deref()));
    let miner = Arc::new(FieldMiner::new(Arc::clone(&mapping)).with_config(config.extraction.clone()));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    let output_names = output_names(&files);

    let mut handles = Vec::with_capacity(files.len());
    for (path, output_name) in files.into_iter().zip(output_names) {
        let miner = Arc::clone(&miner);
        let semaphore = Arc::clone(&semaphore);
        let pb = overall_pb.clone();
        let doc_type = args.doc_type.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();
            let task_path = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                process_single_file(&task_path, &miner, doc_type.as_deref())
            })
            .await?;
            pb.inc(1);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            anyhow::Ok(match result {
                Ok(report) => FileResult {
                    path,
                    output_name,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    output_name,
                    report: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            })
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }
        results.push(result);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        let Some(report) = &result.report else {
            continue;
        };

        match &args.output_dir {
            Some(output_dir) => {
                let output_path = output_dir.join(format!(
                    "{}.{}",
                    result.output_name,
                    args.format.extension()
                ));

                fs::write(&output_path, format_report(report, args.format, &config.output)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!(
                "{}: {} fields, quality {:.2}",
                result.path.display(),
                report.summary.total_fields,
                report.quality_score
            ),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file stem per input. Repeated stems get a `-2`, `-3`, ... suffix.
fn output_names(files: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();

    files
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");

            let mut name = stem.to_string();
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}-{}", stem, n);
                n += 1;
            }

            if name != stem {
                warn!(
                    "Output name {} already taken, writing {} as {}",
                    stem,
                    path.display(),
                    name
                );
            }
            name
        })
        .collect()
}

fn process_single_file(
    path: &Path,
    miner: &FieldMiner,
    doc_type: Option<&str>,
) -> anyhow::Result<ExtractionReport> {
    let doc = DocumentText::from_path(path)?;
    Ok(miner.extract_with_context(&doc.text, doc_type))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = Utc::now().to_rfc3339();

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "total_fields",
        "high_confidence_count",
        "quality_score",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(report) = &result.report {
            wtr.write_record([
                filename,
                "success",
                report.document_type.as_deref().unwrap_or(""),
                &report.summary.total_fields.to_string(),
                &report.summary.high_confidence_count.to_string(),
                &format!("{:.2}", report.quality_score),
                &result.processing_time_ms.to_string(),
                &processed_at,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                &processed_at,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
