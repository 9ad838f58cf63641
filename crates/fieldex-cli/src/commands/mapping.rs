//! Mapping command - inspect the effective mapping table.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use fieldex_core::{MappingTable, normalize_field_name};

use super::{load_config, load_mapping};

/// Arguments for the mapping command.
#[derive(Args)]
pub struct MappingArgs {
    /// Mapping table JSON file (default: configured file or built-in table)
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: MappingCommand,
}

#[derive(Subcommand)]
enum MappingCommand {
    /// List every label and the field it maps to
    Show,

    /// Show which field a label resolves to
    Lookup {
        /// Label as it appears in a document
        label: String,
    },

    /// Write the table as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(args: MappingArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = load_mapping(&config, args.file.as_deref());

    match args.command {
        MappingCommand::Show => show_table(&table),
        MappingCommand::Lookup { label } => lookup_label(&table, &label),
        MappingCommand::Export { output } => export_table(&table, output),
    }
}

fn show_table(table: &MappingTable) -> anyhow::Result<()> {
    let width = table.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, field) in table.iter() {
        println!("{:width$}  {}", label, field, width = width);
    }

    eprintln!();
    eprintln!(
        "{} {} labels, {} fields",
        style("ℹ").blue(),
        table.len(),
        table.targets().count()
    );

    Ok(())
}

fn lookup_label(table: &MappingTable, label: &str) -> anyhow::Result<()> {
    match table.lookup(label) {
        Some(field) => println!("{}", field),
        None => {
            let normalized = normalize_field_name(label);
            println!("{}", normalized);
            if table.is_target(&normalized) {
                eprintln!("{} not a table label, normalized form is a known field", style("ℹ").blue());
            } else {
                eprintln!("{} not in the mapping table", style("ℹ").yellow());
            }
        }
    }

    Ok(())
}

fn export_table(table: &MappingTable, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mappings: serde_json::Map<String, serde_json::Value> = table
        .iter()
        .map(|(label, field)| (label.to_string(), serde_json::Value::from(field)))
        .collect();
    let content = serde_json::to_string_pretty(&serde_json::json!({ "mappings": mappings }))?;

    match output {
        Some(path) => {
            fs::write(&path, content)?;
            eprintln!(
                "{} Exported {} mappings to {}",
                style("✓").green(),
                table.len(),
                path.display()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}
