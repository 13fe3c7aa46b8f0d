//! Corpus discovery and word counting.
//!
//! [`discover_files`] selects the files of one run; [`WordCounts`] accumulates
//! word frequencies across all of them. Counts are kept in first-seen order so
//! every ordering derived from them is reproducible.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use globset::Glob;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::{ScanError, ScanResult};
use crate::filter::WordCleaner;
use crate::normalize::split_lines;

/// File-name glob used when none is configured.
pub const DEFAULT_FILE_PATTERN: &str = "*.yml";

/// Which files under a root make up the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSelection {
    /// Directory holding the localization files.
    pub root: Utf8PathBuf,
    /// Glob matched against each file name (not the full path).
    pub file_pattern: String,
    /// Exact file names to leave out.
    pub excluded_filenames: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl CorpusSelection {
    /// Select `*.yml` files directly under `root`, excluding nothing.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            excluded_filenames: Vec::new(),
            recursive: false,
        }
    }
}

/// List the corpus files, sorted by path.
#[instrument(skip_all, fields(root = %selection.root, pattern = %selection.file_pattern))]
pub fn discover_files(selection: &CorpusSelection) -> ScanResult<Vec<Utf8PathBuf>> {
    if !selection.root.is_dir() {
        return Err(ScanError::MissingRoot(selection.root.clone()));
    }

    let matcher = Glob::new(&selection.file_pattern)
        .map_err(|source| ScanError::InvalidPattern {
            pattern: selection.file_pattern.clone(),
            source,
        })?
        .compile_matcher();

    let max_depth = if selection.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(selection.root.as_std_path())
        .min_depth(1)
        .max_depth(max_depth)
    {
        let entry = entry.map_err(|err| ScanError::ListDir {
            path: err
                .path()
                .and_then(Utf8Path::from_path)
                .map_or_else(|| selection.root.clone(), Utf8Path::to_path_buf),
            source: err.into(),
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(ScanError::NonUtf8Path)?;

        let Some(name) = path.file_name() else {
            continue;
        };
        if !matcher.is_match(name) {
            continue;
        }
        if selection.excluded_filenames.iter().any(|e| e == name) {
            debug!(file = %path, "excluded by name");
            continue;
        }
        files.push(path);
    }

    files.sort();
    debug!(count = files.len(), "corpus files discovered");
    Ok(files)
}

/// Word frequencies across a corpus, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl WordCounts {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        if let Some(&slot) = self.index.get(word) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(word.to_string(), self.entries.len());
            self.entries.push((word.to_string(), 1));
        }
    }

    /// Count every word of every line in `text`. Returns the number of words
    /// counted.
    pub fn count_text(&mut self, text: &str, cleaner: &WordCleaner) -> usize {
        let mut counted = 0;
        for line in split_lines(text) {
            for word in cleaner.words(line) {
                self.add(&word);
                counted += 1;
            }
        }
        counted
    }

    /// Read one UTF-8 file (a leading byte-order mark is ignored) and count
    /// its words. Returns the number of words counted.
    #[instrument(skip_all, fields(file = %path))]
    pub fn count_file(&mut self, path: &Utf8Path, cleaner: &WordCleaner) -> ScanResult<usize> {
        let text = read_corpus_file(path)?;
        let counted = self.count_text(&text, cleaner);
        debug!(words = counted, "file counted");
        Ok(counted)
    }

    /// Occurrences of `word`, if it was seen.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&slot| self.entries[slot].1)
    }

    /// Sum of all occurrence counts.
    pub fn total_words(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct words.
    pub fn unique_words(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no word was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(word, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        for word in iter {
            counts.add(word.as_ref());
        }
        counts
    }
}

/// Read a corpus file as UTF-8, dropping a leading byte-order mark.
pub fn read_corpus_file(path: &Utf8Path) -> ScanResult<String> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::from_utf8(bytes).map_err(|source| ScanError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

/// Count the words of every file into one shared mapping.
///
/// `on_file` is called with each path before it is read. The first failing
/// file aborts the whole count.
#[instrument(skip_all, fields(files = files.len()))]
pub fn count_corpus<F>(
    files: &[Utf8PathBuf],
    cleaner: &WordCleaner,
    mut on_file: F,
) -> ScanResult<WordCounts>
where
    F: FnMut(&Utf8Path),
{
    let mut counts = WordCounts::new();
    for path in files {
        on_file(path);
        counts.count_file(path, cleaner)?;
    }
    Ok(counts)
}
