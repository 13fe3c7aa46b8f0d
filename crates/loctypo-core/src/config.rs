//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `loctypo.<ext>` in current directory or any parent
//! - `.loctypo.<ext>` in current directory or any parent
//! - `~/.config/loctypo/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! Environment variables prefixed `LOCTYPO_` override every file, e.g.
//! `LOCTYPO_DETECTION_THRESHOLD=5000`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use loctypo_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("threshold: {}", config.detection_threshold);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::corpus::DEFAULT_FILE_PATTERN;
use crate::error::{ConfigError, ConfigResult};
use crate::filter::{DEFAULT_PUNCTUATION, DEFAULT_RESERVED_TOKENS, WordCleaner};
use crate::matcher::{DEFAULT_DETECTION_THRESHOLD, DEFAULT_MINIMUM_WORD_LENGTH};

/// File names skipped unless configured otherwise (vanilla game events).
pub const DEFAULT_EXCLUDED_FILENAMES: &[&str] = &["events_l_english.yml"];

/// Report path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// The configuration for loctypo.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON). Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Directory holding the localization files.
    pub corpus_root: Option<Utf8PathBuf>,
    /// Glob matched against file names inside the corpus root.
    pub file_pattern: String,
    /// Exact file names left out of the corpus.
    pub excluded_filenames: Vec<String>,
    /// Descend into subdirectories of the corpus root.
    pub recursive: bool,
    /// Priority score below which matching stops.
    pub detection_threshold: usize,
    /// Common words shorter than this are never matched.
    pub minimum_word_length: usize,
    /// Characters trimmed from both ends of every word.
    pub punctuation_trim_set: String,
    /// Tokens never counted as words (language headers such as `l_english:`).
    pub reserved_tokens: Vec<String>,
    /// Where the CSV report is written.
    pub output: Utf8PathBuf,
    /// Prefix the CSV report with a UTF-8 byte-order mark.
    pub output_bom: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            corpus_root: None,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            excluded_filenames: DEFAULT_EXCLUDED_FILENAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            recursive: false,
            detection_threshold: DEFAULT_DETECTION_THRESHOLD,
            minimum_word_length: DEFAULT_MINIMUM_WORD_LENGTH,
            punctuation_trim_set: DEFAULT_PUNCTUATION.to_string(),
            reserved_tokens: DEFAULT_RESERVED_TOKENS
                .iter()
                .map(|token| (*token).to_string())
                .collect(),
            output: Utf8PathBuf::from(DEFAULT_OUTPUT),
            output_bom: true,
        }
    }
}

impl Config {
    /// Word cleaner built from `punctuation_trim_set` and `reserved_tokens`.
    pub fn word_cleaner(&self) -> WordCleaner {
        WordCleaner::new(&self.punctuation_trim_set, self.reserved_tokens.iter().cloned())
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "loctypo";

/// Project config search stops at the directory containing this entry.
const BOUNDARY_MARKER: &str = ".git";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/loctypo/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `LOCTYPO_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/loctypo/config.<ext>`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        figment = figment.merge(Env::prefixed("LOCTYPO_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            detection_threshold = config.detection_threshold,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if dir.join(BOUNDARY_MARKER).exists() && dir != start {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;

        for ext in CONFIG_EXTENSIONS {
            let config_path = config_dir.join(format!("config.{ext}"));
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        None
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/loctypo/` on Linux, `~/Library/Application Support/loctypo/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn write_config(tmp: &TempDir, name: &str, body: &str) -> Utf8PathBuf {
        let path = tmp.path().join(name);
        fs::write(&path, body).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert!(config.corpus_root.is_none());
        assert_eq!(config.file_pattern, "*.yml");
        assert_eq!(config.excluded_filenames, vec!["events_l_english.yml"]);
        assert_eq!(config.detection_threshold, 3000);
        assert_eq!(config.minimum_word_length, 4);
        assert_eq!(config.punctuation_trim_set, ".!?,;:\"'()[]®\\");
        assert_eq!(config.reserved_tokens, vec!["l_english:"]);
        assert_eq!(config.output, "output.csv");
        assert!(config.output_bom);
        assert!(!config.recursive);
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let loader = ConfigLoader::new()
            .with_user_config(false);

        let (config, sources) = loader.load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.detection_threshold, 3000);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = write_config(
            &tmp,
            "config.toml",
            r#"log_level = "debug"
corpus_root = "/mods/localisation/english"
detection_threshold = 5000
excluded_filenames = []
"#,
        );

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.corpus_root.as_ref().map(|dir| dir.as_str()),
            Some("/mods/localisation/english")
        );
        assert_eq!(config.detection_threshold, 5000);
        assert!(config.excluded_filenames.is_empty());
        // untouched keys keep their defaults
        assert_eq!(config.minimum_word_length, 4);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = write_config(&tmp, "base.toml", "minimum_word_length = 5\n");
        let over = write_config(&tmp, "override.toml", "minimum_word_length = 6\n");

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.minimum_word_length, 6);
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("localisation").join("english");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".loctypo.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!sources.project_files.is_empty());
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();

        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".loctypo.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn dotfile_before_regular() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".loctypo.toml"), "detection_threshold = 1000\n").unwrap();
        fs::write(tmp.path().join("loctypo.toml"), "detection_threshold = 2000\n").unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&tmp_path)
            .load()
            .unwrap();

        assert_eq!(config.detection_threshold, 2000);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.primary_file().unwrap().as_str().ends_with("loctypo.toml"));
    }

    #[test]
    fn yaml_and_json_formats() {
        let tmp = TempDir::new().unwrap();
        let yaml = write_config(
            &tmp,
            "scan.yaml",
            "file_pattern: \"*_l_french.yml\"\nreserved_tokens: [\"l_french:\"]\n",
        );
        let json = write_config(&tmp, "scan.json", r#"{"output_bom": false}"#);

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&yaml)
            .with_file(&json)
            .load()
            .unwrap();

        assert_eq!(config.file_pattern, "*_l_french.yml");
        assert_eq!(config.reserved_tokens, vec!["l_french:"]);
        assert!(!config.output_bom);
        assert_eq!(sources.explicit_files.len(), 2);
    }

    #[test]
    fn invalid_value_is_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "bad.toml", "detection_threshold = \"lots\"\n");

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("loctypo"));
        }
    }

    #[test]
    fn config_deserializes_from_yaml() {
        let yaml = r#"
corpus_root: localisation/english
excluded_filenames:
  - events_l_english.yml
  - vanilla_l_english.yml
recursive: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.corpus_root.unwrap(), "localisation/english");
        assert_eq!(config.excluded_filenames.len(), 2);
        assert!(config.recursive);
        assert_eq!(config.detection_threshold, 3000);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "config.toml", "output = \"from-file.csv\"\n");

        // SAFETY: test-only; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("LOCTYPO_OUTPUT", "from-env.csv");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("LOCTYPO_OUTPUT");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(config.output, "from-env.csv");
    }
}
