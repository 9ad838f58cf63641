//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use fieldex_core::FieldexConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show built-in defaults instead of the file
        #[arg(long)]
        defaults: bool,
    },

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Dotted key (e.g. "extraction.max_value_len")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key
        key: String,
        /// New value, parsed as JSON when possible
        value: String,
    },

    /// Show configuration file path
    Path,
}

/// `--config` selects the file every subcommand works on.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show { defaults } => show_config(&path, defaults),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_config(path: &Path) -> anyhow::Result<FieldexConfig> {
    if path.exists() {
        Ok(FieldexConfig::from_file(path)?)
    } else {
        Ok(FieldexConfig::default())
    }
}

fn show_config(path: &Path, defaults: bool) -> anyhow::Result<()> {
    let config = if defaults {
        FieldexConfig::default()
    } else {
        if !path.exists() {
            eprintln!(
                "{} No config file found, showing defaults.",
                style("ℹ").blue()
            );
        }
        read_config(path)?
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    FieldexConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_config(path)?)?;
    let value = lookup_key(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let parsed: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut json = serde_json::to_value(read_config(path)?)?;
    set_key(&mut json, key, parsed.clone())?;

    // Round-trip through the typed config so bad values are rejected
    let config: FieldexConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'fieldex config init' to create a configuration file.");
    }
    Ok(())
}

fn lookup_key<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace an existing leaf; unknown keys are an error.
fn set_key(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = key
        .split('.')
        .try_fold(json, |current, part| current.get_mut(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;

    if slot.is_object() {
        anyhow::bail!("{} is a section, not a value", key);
    }
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_key() {
        let json = serde_json::to_value(FieldexConfig::default()).unwrap();
        assert_eq!(lookup_key(&json, "extraction.max_value_len"), Some(&json!(200)));
        assert_eq!(lookup_key(&json, "output.pretty_json"), Some(&json!(true)));
        assert!(lookup_key(&json, "extraction.nope").is_none());
    }

    #[test]
    fn test_set_key_replaces_leaves_only() {
        let mut json = serde_json::to_value(FieldexConfig::default()).unwrap();

        set_key(&mut json, "extraction.uniform_false_positive_filter", json!(true)).unwrap();
        let config: FieldexConfig = serde_json::from_value(json.clone()).unwrap();
        assert!(config.extraction.uniform_false_positive_filter);

        assert!(set_key(&mut json, "extraction", json!(1)).is_err());
        assert!(set_key(&mut json, "extraction.unknown", json!(1)).is_err());
    }

    #[test]
    fn test_set_then_get_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set_config(&path, "mapping.file", "/tmp/map.json").unwrap();
        let config = FieldexConfig::from_file(&path).unwrap();
        assert_eq!(config.mapping.file, Some(PathBuf::from("/tmp/map.json")));

        assert!(set_config(&path, "extraction.max_value_len", "\"lots\"").is_err());
    }
}
