//! Core library for loctypo.
//!
//! Finds likely typos in a localization corpus without a dictionary: words
//! that occur exactly once and sit one edit away from a frequent word are
//! reported as probable misspellings of it.
//!
//! # Modules
//!
//! - [`normalize`] - Line cleanup and key removal
//! - [`filter`] - Word cleaning and noise filtering
//! - [`corpus`] - File discovery and word counting
//! - [`rank`] - Singleton extraction and priority ranking
//! - [`matcher`] - One-edit matching of rare words against common ones
//! - [`report`] - Scan results and CSV output
//! - [`scan`] - The end-to-end pipeline
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use loctypo_core::scan::{ScanSettings, run_scan};
//!
//! let settings = ScanSettings::new("localisation/english");
//! let report = run_scan(&settings, |file| println!("{file}")).expect("scan failed");
//! for candidate in &report.candidates {
//!     println!("{} -> {}", candidate.rare_word, candidate.common_word);
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod levenshtein;
pub mod matcher;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod scan;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use corpus::{CorpusSelection, WordCounts};
pub use error::{ConfigError, ConfigResult, ScanError, ScanResult};
pub use filter::WordCleaner;
pub use matcher::MatchSettings;
pub use report::{ScanReport, TypoCandidate};
pub use scan::ScanSettings;
