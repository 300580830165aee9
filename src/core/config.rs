//! Configuration module for `sogrim`

use crate::core::locale::Locale;
use crate::core::models::GradeVocabulary;
use crate::core::validator::ValidationRules;
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

/// Variable expanded to the `sogrim` config directory
const DIR_VARIABLE: &str = "$SOGRIM";

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
    /// Directory for normalized history exports
    #[serde(default)]
    pub out_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Message language ("he" or "en")
    #[serde(default)]
    pub locale: String,
    /// Known category (bank) names; empty accepts any name
    #[serde(default)]
    pub banks: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Non-numeric grade tokens
    #[serde(default = "empty_vocabulary")]
    pub grades: GradeVocabulary,
}

/// Missing `[grades]` means "not configured"; defaults fill it in on merge
const fn empty_vocabulary() -> GradeVocabulary {
    GradeVocabulary::new(Vec::new())
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
    /// Override export output directory
    pub out_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override message locale
    pub locale: Option<String>,
}

impl Config {
    /// Get the `$SOGRIM` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/sogrim`
    /// - macOS: `~/Library/Application Support/sogrim`
    /// - Windows: `%APPDATA%\sogrim`
    #[must_use]
    pub fn get_sogrim_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sogrim")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields that are empty here and set in `defaults` are copied over, so
    /// upgrades pick up new settings without touching existing ones.
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

        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        if self.validation.locale.is_empty() && !defaults.validation.locale.is_empty() {
            self.validation
                .locale
                .clone_from(&defaults.validation.locale);
            changed = true;
        }

        // An empty bank list is a valid setting; an empty vocabulary is not
        if self.grades.is_empty() && !defaults.grades.is_empty() {
            self.grades.clone_from(&defaults.grades);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not
    /// modified.
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

        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }

        if let Some(locale) = &overrides.locale {
            self.validation.locale.clone_from(locale);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_sogrim_dir`](Self::get_sogrim_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_sogrim_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$SOGRIM` in a string to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let sogrim_dir = Self::get_sogrim_dir();
            value.replace(DIR_VARIABLE, sogrim_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$SOGRIM` in path values. Missing fields use their serde
    /// defaults (empty strings, `false`, no grade tokens).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults
    ///   and save it back when something was added
    /// - On first run: create the config directory and save the defaults
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
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Message locale; unknown values fall back to Hebrew
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.validation.locale.parse().unwrap_or_default()
    }

    /// Grade vocabulary and bank names the validator checks against
    #[must_use]
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::new(self.grades.clone(), self.validation.banks.clone())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `out_dir`, `reports_dir`,
    /// `locale`, `banks` (comma-separated) and `grades` (comma-separated labels,
    /// read-only).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "locale" => Some(self.validation.locale.clone()),
            "banks" => Some(self.validation.banks.join(",")),
            "grades" => Some(self.grades.labels().join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `verbose` takes `true`/`false`, `locale` takes `he`/`en`, `banks` takes a
    /// comma-separated list. Grade tokens are edited in the config file.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or read-only, or the value
    /// cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "locale" => {
                let locale: Locale = value.parse()?;
                self.validation.locale = locale.code().to_string();
            }
            "banks" => {
                self.validation.banks = value
                    .split(',')
                    .map(str::trim)
                    .filter(|bank| !bank.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "grades" => {
                return Err(format!(
                    "'grades' is read-only here; edit [[grades.tokens]] in {}",
                    Self::get_config_file_path().display()
                ))
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "locale" => self
                .validation
                .locale
                .clone_from(&defaults.validation.locale),
            "banks" => self
                .validation
                .banks
                .clone_from(&defaults.validation.banks),
            "grades" => self.grades.clone_from(&defaults.grades),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[validation]")?;
        writeln!(f, "  locale = \"{}\"", self.validation.locale)?;
        writeln!(f, "  banks = {:?}", self.validation.banks)?;

        writeln!(f, "\n[grades]")?;
        for token in &self.grades.tokens {
            writeln!(f, "  \"{}\" = {:?}", token.label, token.kind)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert_eq!(config.grades, GradeVocabulary::default());
        assert_eq!(config.locale(), Locale::He);
    }

    #[test]
    fn test_expand_variables() {
        let expanded = Config::expand_variables("$SOGRIM/logs/sogrim.log");
        assert!(!expanded.contains(DIR_VARIABLE));
        assert!(expanded.ends_with("logs/sogrim.log"));
        assert_eq!(Config::expand_variables("/tmp/x"), "/tmp/x");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let mut config = Config::default();
        config.validation.locale = "klingon".to_string();
        assert_eq!(config.locale(), Locale::He);
    }
}
