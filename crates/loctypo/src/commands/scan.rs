//! Scan command: find likely typos across a localization corpus.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use loctypo_core::config::Config;
use loctypo_core::corpus;
use loctypo_core::report::{self, ScanReport};
use loctypo_core::scan::{self, ScanSettings};

use super::{display_path, resolve_corpus_root};

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory holding the localization files (default: `corpus_root` from config).
    pub corpus_root: Option<Utf8PathBuf>,

    /// Where to write the CSV report.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Stop matching at the first word scoring below this.
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<usize>,

    /// Skip common words shorter than this many characters.
    #[arg(long, value_name = "CHARS")]
    pub min_length: Option<usize>,

    /// Glob matched against file names.
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// File name to leave out (repeatable; replaces the configured list).
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Descend into subdirectories.
    #[arg(long)]
    pub recursive: bool,

    /// Do not prefix the report with a byte-order mark.
    #[arg(long)]
    pub no_bom: bool,
}

impl ScanArgs {
    /// Apply command-line overrides on top of the configured settings.
    fn apply(&self, settings: &mut ScanSettings) {
        if let Some(threshold) = self.threshold {
            settings.matching.detection_threshold = threshold;
        }
        if let Some(min_length) = self.min_length {
            settings.matching.minimum_word_length = min_length;
        }
        if let Some(ref pattern) = self.pattern {
            settings.corpus.file_pattern.clone_from(pattern);
        }
        if !self.exclude.is_empty() {
            settings.corpus.excluded_filenames.clone_from(&self.exclude);
        }
        if self.recursive {
            settings.corpus.recursive = true;
        }
    }
}

/// JSON output: the scan report plus where the CSV went.
#[derive(Serialize)]
struct ScanOutput<'a> {
    #[serde(flatten)]
    report: &'a ScanReport,
    output: Utf8PathBuf,
}

fn progress_bar(len: usize, hidden: bool) -> anyhow::Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

/// Scan the corpus, write the CSV report and print a summary.
#[instrument(name = "cmd_scan", skip_all)]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(?args, "executing scan command");

    let root = resolve_corpus_root(args.corpus_root.clone(), config.corpus_root.as_ref())?;
    let mut settings = ScanSettings::from_config(config, root);
    args.apply(&mut settings);

    let files = corpus::discover_files(&settings.corpus)
        .with_context(|| format!("failed to list corpus files in {}", settings.corpus.root))?;
    if files.is_empty() {
        tracing::warn!(
            root = %settings.corpus.root,
            pattern = %settings.corpus.file_pattern,
            "no corpus files matched"
        );
    }

    let bar = progress_bar(files.len(), global_json || quiet)?;
    let report = scan::scan_files(&settings, files, |path| {
        bar.suspend(|| info!(file = %path, "processing"));
        bar.set_message(path.file_name().unwrap_or_default().to_string());
        bar.inc(1);
    })
    .context("scan failed")?;
    bar.finish_and_clear();

    let output = args.output.unwrap_or_else(|| config.output.clone());
    let bom = config.output_bom && !args.no_bom;
    report::write_csv_file(&output, &report.candidates, bom)
        .with_context(|| format!("failed to write report to {output}"))?;

    if global_json {
        let json = ScanOutput {
            report: &report,
            output: display_path(&output),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!(
        "Found {} words, and {} unique words in {} files",
        report.total_words.bold(),
        report.unique_words.bold(),
        report.files.len(),
    );
    if report.candidates.is_empty() {
        println!("{} no possible typos", "PASS:".green());
    } else {
        for candidate in &report.candidates {
            println!(
                "  {} {} {} {}",
                candidate.rare_word.yellow(),
                "→".dimmed(),
                candidate.common_word,
                format!("({})", candidate.prior_weight).dimmed(),
            );
        }
        println!(
            "Found {} possible typos",
            report.candidates.len().yellow().bold()
        );
    }
    println!("{}: {}", "Report".dimmed(), display_path(&output).cyan());

    Ok(())
}
