//! Application configuration management.
//!
//! # Overview
//!
//! Settings are layered with [`figment`], lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory
//! 3. A file passed with `--config`
//! 4. `SIMDUPE_*` environment variables (`__` separates nested keys)
//!
//! # Example
//!
//! ```toml
//! skip_hidden = true
//!
//! [comparers]
//! timeout_secs = 30
//!
//! [comparers.spreadsheet]
//! program = "python3"
//! args = ["compare_excel.py"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duplicates::{
    DocumentComparer, DocumentComparers, DocxTextComparer, NullComparer, ProcessComparer,
};
use crate::duplicates::finder::DEFAULT_PROGRESS_INTERVAL;
use crate::scanner::WalkerConfig;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SIMDUPE_";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// The effective configuration could not be rendered as TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// An external helper invoked as `program args... <path1> <path2>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperCommand {
    /// Executable name or path.
    pub program: String,
    /// Arguments placed before the two file paths.
    #[serde(default)]
    pub args: Vec<String>,
}

impl HelperCommand {
    fn comparer(&self, timeout: Option<Duration>) -> Box<dyn DocumentComparer> {
        let comparer = ProcessComparer::new(self.program.clone(), self.args.clone());
        Box::new(comparer.with_timeout(timeout))
    }
}

/// Document comparer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparerConfig {
    /// Helper for `.xlsx`/`.xls` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<HelperCommand>,
    /// Helper for `.docx` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<HelperCommand>,
    /// Helper for `.pptx` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation: Option<HelperCommand>,
    /// Compare `.docx` text in process when no word helper is set.
    pub builtin_word: bool,
    /// Kill helpers that run longer than this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ComparerConfig {
    /// Build the comparer set described by this configuration.
    ///
    /// Formats without a helper get a [`NullComparer`], so matching falls
    /// back to the size and name heuristics.
    #[must_use]
    pub fn build(&self) -> DocumentComparers {
        let timeout = self.timeout_secs.map(Duration::from_secs);
        let external = |helper: &Option<HelperCommand>| -> Box<dyn DocumentComparer> {
            match helper {
                Some(helper) => helper.comparer(timeout),
                None => Box::new(NullComparer),
            }
        };

        let word: Box<dyn DocumentComparer> = match (&self.word, self.builtin_word) {
            (Some(helper), _) => helper.comparer(timeout),
            (None, true) => Box::new(DocxTextComparer),
            (None, false) => Box::new(NullComparer),
        };

        DocumentComparers {
            spreadsheet: external(&self.spreadsheet),
            word,
            presentation: external(&self.presentation),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Follow symbolic links while cataloguing.
    pub follow_symlinks: bool,
    /// Skip dot-files and dot-directories.
    pub skip_hidden: bool,
    /// Records between progress events.
    pub progress_interval: usize,
    /// Document comparer helpers.
    pub comparers: ComparerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            skip_hidden: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            comparers: ComparerConfig::default(),
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// # Arguments
    ///
    /// * `explicit` - A file given on the command line; it must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let default_file = Self::default_path();
        Self::load_from(default_file.as_deref(), explicit)
    }

    /// Load with an explicit choice of platform config file.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(
        platform: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = platform {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            log::debug!("Loading config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "simdupe", "simdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if rendering fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Catalog settings.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            skip_hidden: self.skip_hidden,
        }
    }
}
