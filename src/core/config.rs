//! Configuration module for `studypath`

use crate::core::recommender::{Limit, RecommendOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$STUDYPATH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON snapshot holding catalog, users, interests and progress
    #[serde(default)]
    pub data_file: String,
    /// Keyword registry override; empty means the built-in registry
    #[serde(default)]
    pub keywords_file: String,
}

/// Recommendation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsConfig {
    /// Number of recommendations when no limit is given
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Career titles named in a recommendation reason
    #[serde(default = "default_reason_careers")]
    pub reason_careers: usize,
    /// Length of the learning objectives preview
    #[serde(default = "default_preview_chars")]
    pub objectives_preview_chars: usize,
}

const fn default_limit() -> usize {
    Limit::DEFAULT.get()
}

const fn default_reason_careers() -> usize {
    3
}

const fn default_preview_chars() -> usize {
    300
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            reason_careers: default_reason_careers(),
            objectives_preview_chars: default_preview_chars(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Recommendation settings
    #[serde(default)]
    pub recommendations: RecommendationsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data file
    pub data_file: Option<String>,
    /// Override keyword registry file
    pub keywords_file: Option<String>,
}

impl Config {
    /// Get the `$STUDYPATH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studypath`
    /// - macOS: `~/Library/Application Support/studypath`
    /// - Windows: `%APPDATA%\studypath`
    #[must_use]
    pub fn get_studypath_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studypath")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated; numeric settings get their defaults from serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.paths.data_file.is_empty() && !defaults.paths.data_file.is_empty() {
            self.paths.data_file.clone_from(&defaults.paths.data_file);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for a single run; the persistent file is not touched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_file) = &overrides.data_file {
            self.paths.data_file = Self::expand_variables(data_file);
        }
        if let Some(keywords_file) = &overrides.keywords_file {
            self.paths.keywords_file = Self::expand_variables(keywords_file);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds
    ///
    /// The file is located in the directory returned by [`get_studypath_dir`].
    ///
    /// [`get_studypath_dir`]: Self::get_studypath_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studypath_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDYPATH` to the config directory
    ///
    /// ```ignore
    /// let expanded = Config::expand_variables("$STUDYPATH/data.json");
    /// // "/home/user/.config/studypath/data.json"
    /// ```
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studypath_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string, expanding `$STUDYPATH` in path values
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_file = Self::expand_variables(&config.paths.data_file);
        config.paths.keywords_file = Self::expand_variables(&config.paths.keywords_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// - Debug: Uses `DefaultCLIConfigDebug.toml`
    /// - Release: Uses `DefaultCLIConfigRelease.toml`
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults
    ///   and save it back when something was added
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// The saved file will use the format:
    /// ```toml
    /// [logging]
    /// level = "info"
    /// file = "$STUDYPATH/logs/studypath.log"
    /// verbose = false
    ///
    /// [paths]
    /// data_file = "$STUDYPATH/data.json"
    /// keywords_file = ""
    ///
    /// [recommendations]
    /// default_limit = 10
    /// reason_careers = 3
    /// objectives_preview_chars = 300
    /// ```
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `data_file`, `keywords_file`,
    /// `default_limit`, `reason_careers`, `objectives_preview_chars` (dashes are
    /// accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_file" => Some(self.paths.data_file.clone()),
            "keywords_file" => Some(self.paths.keywords_file.clone()),
            "default_limit" => Some(self.recommendations.default_limit.to_string()),
            "reason_careers" => Some(self.recommendations.reason_careers.to_string()),
            "objectives_preview_chars" => {
                Some(self.recommendations.objectives_preview_chars.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., "maybe" for verbose, "0" for `default_limit`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_file" => self.paths.data_file = value.to_string(),
            "keywords_file" => self.paths.keywords_file = value.to_string(),
            "default_limit" => {
                let limit: Limit = value.parse().map_err(|e| format!("{e}"))?;
                self.recommendations.default_limit = limit.get();
            }
            "reason_careers" => {
                self.recommendations.reason_careers = parse_positive_count(key, value)?;
            }
            "objectives_preview_chars" => {
                self.recommendations.objectives_preview_chars = parse_count(key, value)?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_file" => self.paths.data_file.clone_from(&defaults.paths.data_file),
            "keywords_file" => self
                .paths
                .keywords_file
                .clone_from(&defaults.paths.keywords_file),
            "default_limit" => {
                self.recommendations.default_limit = defaults.recommendations.default_limit;
            }
            "reason_careers" => {
                self.recommendations.reason_careers = defaults.recommendations.reason_careers;
            }
            "objectives_preview_chars" => {
                self.recommendations.objectives_preview_chars =
                    defaults.recommendations.objectives_preview_chars;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Recommendation options for this config; `limit` overrides the default
    ///
    /// A configured default limit or reason career count of 0 falls back to
    /// the built-in default.
    #[must_use]
    pub fn recommend_options(&self, limit: Option<Limit>) -> RecommendOptions {
        let default_limit = Limit::new(self.recommendations.default_limit).unwrap_or_default();
        let reason_careers = match self.recommendations.reason_careers {
            0 => default_reason_careers(),
            n => n,
        };
        RecommendOptions {
            limit: limit.unwrap_or(default_limit),
            reason_careers,
            objectives_preview_chars: self.recommendations.objectives_preview_chars,
        }
    }

    /// Keyword registry override, if one is configured
    #[must_use]
    pub fn keywords_path(&self) -> Option<PathBuf> {
        (!self.paths.keywords_file.is_empty()).then(|| PathBuf::from(&self.paths.keywords_file))
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("Invalid count for '{key}': '{value}'"))
}

fn parse_positive_count(key: &str, value: &str) -> Result<usize, String> {
    match parse_count(key, value)? {
        0 => Err(format!("'{key}' must be greater than 0")),
        n => Ok(n),
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_file = \"{}\"", self.paths.data_file)?;
        writeln!(f, "  keywords_file = \"{}\"", self.paths.keywords_file)?;

        writeln!(f, "\n[recommendations]")?;
        writeln!(f, "  default_limit = {}", self.recommendations.default_limit)?;
        writeln!(f, "  reason_careers = {}", self.recommendations.reason_careers)?;
        writeln!(
            f,
            "  objectives_preview_chars = {}",
            self.recommendations.objectives_preview_chars
        )?;

        Ok(())
    }
}
