//! Configuration file loading with precedence handling.

use crate::model::date_range::MAX_LOOKAHEAD_MONTHS;
use crate::model::{MonthFormatter, PickerMode, DEFAULT_LOCALE, DEFAULT_MONTH_TEMPLATE};
use crate::model::format::FormatError;
use crate::state::month_strip::LOOKAHEAD_MONTHS;
use crate::state::picker::DEFAULT_STRIP_HEIGHT;
use chrono::{NaiveDate, Weekday};
use ratatui::style::Color;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MONTHPICK_CONFIG";

/// Environment variable overriding the locale.
pub const LOCALE_ENV_VAR: &str = "MONTHPICK_LOCALE";

/// Default month strip cell width in columns.
pub const DEFAULT_CELL_WIDTH: u16 = 14;

/// Narrowest usable month strip cell.
pub const MIN_CELL_WIDTH: u16 = 4;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A key parsed but its value is unusable.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Config key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/monthpick/config.toml`:
///
/// ```toml
/// start_date = "2024-01-01"
/// end_date = "2025-12-31"
/// locale = "de_DE"
/// month_format = "%b %Y"
/// week_start = "sun"
/// mode = "pager-only"
/// active_color = "#ffaa00"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Earliest selectable date (ISO `YYYY-MM-DD` string).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Latest selectable date (ISO `YYYY-MM-DD` string).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Locale for month and weekday names (e.g. "fr_FR").
    #[serde(default)]
    pub locale: Option<String>,

    /// strftime template for month labels.
    #[serde(default)]
    pub month_format: Option<String>,

    /// First day of the week in the day grid ("mon", "sunday", ...).
    #[serde(default)]
    pub week_start: Option<Weekday>,

    /// Months kept on each side of the anchor in an unbounded strip.
    #[serde(default)]
    pub lookahead_months: Option<u32>,

    /// Month strip height in rows.
    #[serde(default)]
    pub strip_height: Option<u16>,

    /// Month strip cell width in columns.
    #[serde(default)]
    pub cell_width: Option<u16>,

    /// Colour of the centered month label.
    #[serde(default)]
    pub active_color: Option<String>,

    /// Colour of off-center month labels.
    #[serde(default)]
    pub inactive_color: Option<String>,

    /// Surfaces to show.
    #[serde(default)]
    pub mode: Option<PickerMode>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Earliest selectable date.
    pub start_date: Option<NaiveDate>,
    /// Latest selectable date.
    pub end_date: Option<NaiveDate>,
    /// Locale name.
    pub locale: String,
    /// Month label template.
    pub month_format: String,
    /// First grid column.
    pub week_start: Weekday,
    /// Strip window lookahead in months.
    pub lookahead_months: u32,
    /// Strip height in rows.
    pub strip_height: u16,
    /// Strip cell width in columns.
    pub cell_width: u16,
    /// Centered month colour.
    pub active_color: Color,
    /// Off-center month colour.
    pub inactive_color: Color,
    /// Surfaces to show.
    pub mode: PickerMode,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            locale: DEFAULT_LOCALE.to_string(),
            month_format: DEFAULT_MONTH_TEMPLATE.to_string(),
            week_start: Weekday::Mon,
            lookahead_months: LOOKAHEAD_MONTHS,
            strip_height: DEFAULT_STRIP_HEIGHT,
            cell_width: DEFAULT_CELL_WIDTH,
            active_color: Color::Cyan,
            inactive_color: Color::DarkGray,
            mode: PickerMode::Combined,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Build the month label formatter for the configured locale and template.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown locale or a malformed template.
    pub fn month_formatter(&self) -> Result<MonthFormatter, FormatError> {
        MonthFormatter::new(&self.locale, &self.month_format)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/monthpick/monthpick.log` on Linux, or the
/// appropriate platform path elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("monthpick").join("monthpick.log")
    } else {
        PathBuf::from("monthpick.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/monthpick/config.toml` on Linux, appropriate path on
/// other platforms. Returns `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("monthpick").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MONTHPICK_CONFIG` environment variable
/// 3. Default path `~/.config/monthpick/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MONTHPICK_LOCALE`: Override locale
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(locale) = std::env::var(LOCALE_ENV_VAR) {
        if !locale.is_empty() {
            config.locale = locale;
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for colours that do not parse and
/// for numeric settings outside their allowed range.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let lookahead_months = config.lookahead_months.unwrap_or(defaults.lookahead_months);
    if !(1..=MAX_LOOKAHEAD_MONTHS).contains(&lookahead_months) {
        return Err(ConfigError::InvalidValue {
            key: "lookahead_months",
            reason: format!("must be between 1 and {MAX_LOOKAHEAD_MONTHS}"),
        });
    }

    let strip_height = config.strip_height.unwrap_or(defaults.strip_height);
    if strip_height == 0 {
        return Err(ConfigError::InvalidValue {
            key: "strip_height",
            reason: "must be at least 1".to_string(),
        });
    }

    let cell_width = config.cell_width.unwrap_or(defaults.cell_width);
    if cell_width < MIN_CELL_WIDTH {
        return Err(ConfigError::InvalidValue {
            key: "cell_width",
            reason: format!("must be at least {MIN_CELL_WIDTH}"),
        });
    }

    Ok(ResolvedConfig {
        start_date: config.start_date,
        end_date: config.end_date,
        locale: config.locale.unwrap_or(defaults.locale),
        month_format: config.month_format.unwrap_or(defaults.month_format),
        week_start: config.week_start.unwrap_or(defaults.week_start),
        lookahead_months,
        strip_height,
        cell_width,
        active_color: parse_color("active_color", config.active_color)?
            .unwrap_or(defaults.active_color),
        inactive_color: parse_color("inactive_color", config.inactive_color)?
            .unwrap_or(defaults.inactive_color),
        mode: config.mode.unwrap_or(defaults.mode),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

fn parse_color(key: &'static str, value: Option<String>) -> Result<Option<Color>, ConfigError> {
    value
        .map(|value| {
            Color::from_str(&value).map_err(|_| ConfigError::InvalidValue {
                key,
                reason: format!("unknown colour {value:?}"),
            })
        })
        .transpose()
}

/// CLI flags that take precedence over every other source.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--mode`
    pub mode: Option<PickerMode>,
    /// `--start`
    pub start_date: Option<NaiveDate>,
    /// `--end`
    pub end_date: Option<NaiveDate>,
    /// `--locale`
    pub locale: Option<String>,
    /// `--week-start`
    pub week_start: Option<Weekday>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(mode) = overrides.mode {
        config.mode = mode;
    }
    if let Some(start) = overrides.start_date {
        config.start_date = Some(start);
    }
    if let Some(end) = overrides.end_date {
        config.end_date = Some(end);
    }
    if let Some(locale) = overrides.locale {
        config.locale = locale;
    }
    if let Some(week_start) = overrides.week_start {
        config.week_start = week_start;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
