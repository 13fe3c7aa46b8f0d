//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

pub mod info;
pub mod scan;
pub mod tokenize;

/// Resolve `path` against the working directory for display and error
/// messages.
///
/// Relative paths stay relative when the working directory cannot be read.
pub fn display_path(path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| Utf8PathBuf::from_path_buf(cwd).ok())
        .map_or_else(|| path.to_path_buf(), |cwd| cwd.join(path))
}

/// Pick the corpus root from the command line, falling back to the config.
pub fn resolve_corpus_root(
    arg: Option<Utf8PathBuf>,
    configured: Option<&Utf8PathBuf>,
) -> anyhow::Result<Utf8PathBuf> {
    arg.or_else(|| configured.cloned())
        .context("no corpus root given: pass CORPUS_ROOT or set `corpus_root` in the config")
}
