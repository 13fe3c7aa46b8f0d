//! The scan pipeline: discover → count → rank → match.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, instrument};

use crate::config::Config;
use crate::corpus::{self, CorpusSelection};
use crate::error::ScanResult;
use crate::filter::WordCleaner;
use crate::matcher::{self, MatchSettings};
use crate::rank;
use crate::report::ScanReport;

/// Everything a scan needs besides the files themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Which files form the corpus.
    pub corpus: CorpusSelection,
    /// How words are cleaned and filtered.
    pub cleaner: WordCleaner,
    /// Matching cut-offs.
    pub matching: MatchSettings,
}

impl ScanSettings {
    /// Default settings for the corpus under `root`.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            corpus: CorpusSelection::new(root),
            cleaner: WordCleaner::default(),
            matching: MatchSettings::default(),
        }
    }

    /// Settings for the corpus under `root`, taking every other knob from
    /// `config`.
    pub fn from_config(config: &Config, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            corpus: CorpusSelection {
                root: root.into(),
                file_pattern: config.file_pattern.clone(),
                excluded_filenames: config.excluded_filenames.clone(),
                recursive: config.recursive,
            },
            cleaner: config.word_cleaner(),
            matching: MatchSettings {
                detection_threshold: config.detection_threshold,
                minimum_word_length: config.minimum_word_length,
            },
        }
    }
}

/// Discover the corpus files and scan them.
pub fn run_scan<F>(settings: &ScanSettings, on_file: F) -> ScanResult<ScanReport>
where
    F: FnMut(&Utf8Path),
{
    let files = corpus::discover_files(&settings.corpus)?;
    scan_files(settings, files, on_file)
}

/// Scan an already selected list of files.
///
/// `on_file` is called with each path right before it is read.
#[instrument(skip_all, fields(root = %settings.corpus.root, files = files.len()))]
pub fn scan_files<F>(
    settings: &ScanSettings,
    files: Vec<Utf8PathBuf>,
    on_file: F,
) -> ScanResult<ScanReport>
where
    F: FnMut(&Utf8Path),
{
    let counts = corpus::count_corpus(&files, &settings.cleaner, on_file)?;
    info!(
        total_words = counts.total_words(),
        unique_words = counts.unique_words(),
        "corpus counted"
    );

    let rank::Ranking {
        ranked,
        mut singletons,
    } = rank::rank(&counts);
    let singleton_words = singletons.len();

    let candidates = matcher::find_typos(&ranked, &mut singletons, &settings.matching);
    info!(candidates = candidates.len(), "matching finished");

    Ok(ScanReport {
        files,
        total_words: counts.total_words(),
        unique_words: counts.unique_words(),
        singleton_words,
        candidates,
    })
}
