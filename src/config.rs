//! Configuration module for `CoursePlanner`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside path values
const DIR_VARIABLE: &str = "$COURSE_PLANNER";

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
    /// Course graph source: a `.json` file or a directory holding the catalog CSV bundle
    #[serde(default)]
    pub graph_file: String,
    /// Prerequisite policy table (JSON); empty means no policies
    #[serde(default)]
    pub policy_file: String,
    /// Directory for exported views
    #[serde(default)]
    pub out_dir: String,
}

/// Plan bootstrap configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Courses added to the plan when a session starts
    #[serde(default)]
    pub mandatory: Vec<String>,
    /// Namespace prefix of the home department (e.g. "EECE")
    #[serde(default)]
    pub home_prefix: String,
}

/// Grid spacing for the rearranged layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical distance between level rows
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,
    /// Horizontal distance between category columns
    #[serde(default = "default_column_spacing")]
    pub column_spacing: f64,
    /// Distance between nodes sharing a grid cell
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
    /// Maximum positional jitter applied in each axis
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

const fn default_row_spacing() -> f64 {
    220.0
}

const fn default_column_spacing() -> f64 {
    320.0
}

const fn default_node_spacing() -> f64 {
    70.0
}

const fn default_jitter() -> f64 {
    8.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_spacing: default_row_spacing(),
            column_spacing: default_column_spacing(),
            node_spacing: default_node_spacing(),
            jitter: default_jitter(),
        }
    }
}

/// Graph loading configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Additional attempts after a failed read
    #[serde(default)]
    pub retries: u32,
    /// Delay before the first retry, multiplied by the attempt number
    #[serde(default)]
    pub backoff_ms: u64,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Plan settings
    #[serde(default)]
    pub plan: PlanConfig,
    /// Layout settings
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Loading settings
    #[serde(default)]
    pub loading: LoadingConfig,
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
    /// Override course graph source
    pub graph_file: Option<String>,
    /// Override policy table path
    pub policy_file: Option<String>,
    /// Override export directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Get the `$COURSE_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/courseplanner`
    /// - macOS: `~/Library/Application Support/courseplanner`
    /// - Windows: `%APPDATA%\courseplanner`
    #[must_use]
    pub fn get_courseplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courseplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled,
    /// so upgrading picks up new settings without touching user values.
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

        if self.paths.graph_file.is_empty() && !defaults.paths.graph_file.is_empty() {
            self.paths.graph_file.clone_from(&defaults.paths.graph_file);
            changed = true;
        }
        if self.paths.policy_file.is_empty() && !defaults.paths.policy_file.is_empty() {
            self.paths.policy_file.clone_from(&defaults.paths.policy_file);
            changed = true;
        }
        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }

        if self.plan.home_prefix.is_empty() && !defaults.plan.home_prefix.is_empty() {
            self.plan.home_prefix.clone_from(&defaults.plan.home_prefix);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
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

        if let Some(graph_file) = &overrides.graph_file {
            self.paths.graph_file.clone_from(graph_file);
        }
        if let Some(policy_file) = &overrides.policy_file {
            self.paths.policy_file.clone_from(policy_file);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_courseplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$COURSE_PLANNER` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_courseplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$COURSE_PLANNER` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.graph_file = Self::expand_variables(&config.paths.graph_file);
        config.paths.policy_file = Self::expand_variables(&config.paths.policy_file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if changed
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory cannot be
    /// created, or the file cannot be written
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
    /// Supported keys: `level`, `file`, `verbose`, `graph_file`, `policy_file`,
    /// `out_dir`, `mandatory` (comma-separated), `home_prefix`, `row_spacing`,
    /// `column_spacing`, `node_spacing`, `jitter`, `retries`, `backoff_ms`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "graph_file" | "graph-file" => Some(self.paths.graph_file.clone()),
            "policy_file" | "policy-file" => Some(self.paths.policy_file.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "mandatory" => Some(self.plan.mandatory.join(", ")),
            "home_prefix" | "home-prefix" => Some(self.plan.home_prefix.clone()),
            "row_spacing" => Some(self.layout.row_spacing.to_string()),
            "column_spacing" => Some(self.layout.column_spacing.to_string()),
            "node_spacing" => Some(self.layout.node_spacing.to_string()),
            "jitter" => Some(self.layout.jitter.to_string()),
            "retries" => Some(self.loading.retries.to_string()),
            "backoff_ms" => Some(self.loading.backoff_ms.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `mandatory` takes a comma-separated course list. Numeric keys are
    /// validated. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "graph_file" | "graph-file" => self.paths.graph_file = value.to_string(),
            "policy_file" | "policy-file" => self.paths.policy_file = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "mandatory" => self.plan.mandatory = split_course_list(value),
            "home_prefix" | "home-prefix" => self.plan.home_prefix = value.trim().to_string(),
            "row_spacing" => self.layout.row_spacing = parse_spacing(key, value)?,
            "column_spacing" => self.layout.column_spacing = parse_spacing(key, value)?,
            "node_spacing" => self.layout.node_spacing = parse_spacing(key, value)?,
            "jitter" => self.layout.jitter = parse_spacing(key, value)?,
            "retries" => {
                self.loading.retries = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid integer value for 'retries': '{value}'"))?;
            }
            "backoff_ms" => {
                self.loading.backoff_ms = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid integer value for 'backoff_ms': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "graph_file" | "graph-file" => {
                self.paths.graph_file.clone_from(&defaults.paths.graph_file);
            }
            "policy_file" | "policy-file" => {
                self.paths.policy_file.clone_from(&defaults.paths.policy_file);
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "mandatory" => self.plan.mandatory.clone_from(&defaults.plan.mandatory),
            "home_prefix" | "home-prefix" => {
                self.plan.home_prefix.clone_from(&defaults.plan.home_prefix);
            }
            "row_spacing" => self.layout.row_spacing = defaults.layout.row_spacing,
            "column_spacing" => self.layout.column_spacing = defaults.layout.column_spacing,
            "node_spacing" => self.layout.node_spacing = defaults.layout.node_spacing,
            "jitter" => self.layout.jitter = defaults.layout.jitter,
            "retries" => self.loading.retries = defaults.loading.retries,
            "backoff_ms" => self.loading.backoff_ms = defaults.loading.backoff_ms,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when the file does not exist.
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
}

/// Split a comma-separated course list, dropping blanks
#[must_use]
pub fn split_course_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_spacing(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!(
            "Invalid value for '{key}': '{value}' (expected a non-negative number)"
        )),
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  graph_file = \"{}\"", self.paths.graph_file)?;
        writeln!(f, "  policy_file = \"{}\"", self.paths.policy_file)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[plan]")?;
        writeln!(f, "  mandatory = [{}]", self.plan.mandatory.join(", "))?;
        writeln!(f, "  home_prefix = \"{}\"", self.plan.home_prefix)?;

        writeln!(f, "\n[layout]")?;
        writeln!(f, "  row_spacing = {}", self.layout.row_spacing)?;
        writeln!(f, "  column_spacing = {}", self.layout.column_spacing)?;
        writeln!(f, "  node_spacing = {}", self.layout.node_spacing)?;
        writeln!(f, "  jitter = {}", self.layout.jitter)?;

        writeln!(f, "\n[loading]")?;
        writeln!(f, "  retries = {}", self.loading.retries)?;
        writeln!(f, "  backoff_ms = {}", self.loading.backoff_ms)?;

        Ok(())
    }
}
