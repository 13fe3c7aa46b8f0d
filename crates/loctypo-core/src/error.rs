//! Error types for loctypo-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a corpus scan.
///
/// Every variant is fatal: a partially read corpus would skew the word
/// frequencies, so nothing is skipped silently.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The corpus root does not exist or is not a directory.
    #[error("corpus root {0} is not a directory")]
    MissingRoot(Utf8PathBuf),

    /// A directory inside the corpus could not be listed.
    #[error("failed to list {path}")]
    ListDir {
        /// Directory being listed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A corpus file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A corpus file is not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    Decode {
        /// File being decoded.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A path inside the corpus is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The file-name pattern is not a valid glob.
    #[error("invalid file pattern {pattern:?}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// The report could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ScanError`].
pub type ScanResult<T> = Result<T, ScanError>;
