//! Info command implementation

use clap::Args;
use loctypo_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus_root: Option<String>,
    file_pattern: String,
    excluded_filenames: Vec<String>,
    recursive: bool,
    detection_threshold: usize,
    minimum_word_length: usize,
    output: String,
    output_bom: bool,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            corpus_root: config.corpus_root.as_ref().map(|p| p.to_string()),
            file_pattern: config.file_pattern.clone(),
            excluded_filenames: config.excluded_filenames.clone(),
            recursive: config.recursive,
            detection_threshold: config.detection_threshold,
            minimum_word_length: config.minimum_word_length,
            output: config.output.to_string(),
            output_bom: config.output_bom,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let FullInfo { package, config } = full_info;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    match config.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), config.log_level);
    if let Some(ref dir) = config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Scan".bold().underline());
    match config.corpus_root {
        Some(ref root) => println!("{}: {}", "Corpus root".dimmed(), root.cyan()),
        None => println!("{}: {}", "Corpus root".dimmed(), "(not set)".dimmed()),
    }
    println!("{}: {}", "File pattern".dimmed(), config.file_pattern);
    println!(
        "{}: {}",
        "Excluded files".dimmed(),
        config.excluded_filenames.join(", ")
    );
    println!("{}: {}", "Recursive".dimmed(), config.recursive);
    println!(
        "{}: {}",
        "Detection threshold".dimmed(),
        config.detection_threshold
    );
    println!(
        "{}: {}",
        "Minimum word length".dimmed(),
        config.minimum_word_length
    );
    println!("{}: {}", "Output".dimmed(), config.output);
    println!("{}: {}", "Byte-order mark".dimmed(), config.output_bom);

    Ok(())
}
