//! Configuration management for Tech City.
//!
//! Parses `techcity.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path settings support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a bare `$VAR` is kept literally
//!
//! Expanded fields:
//! - `site.out_dir`
//! - `site.data_dir`
//! - `site.templates_dir`
//! - `site.public_dir`

mod expand;

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use chrono_tz::Tz;
use serde::Deserialize;
use techcity_data::EventWindow;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
    /// Override data directory.
    pub data_dir: Option<PathBuf>,
    /// Override template directory.
    pub templates_dir: Option<PathBuf>,
    /// Override static asset directory.
    pub public_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "techcity.toml";

/// Longest window a config may request, in days.
const MAX_WINDOW_DAYS: i64 = 100 * 365;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site paths as written in TOML.
    site: SiteConfigRaw,
    /// Event query windows.
    pub events: EventsConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    out_dir: Option<String>,
    data_dir: Option<String>,
    templates_dir: Option<String>,
    public_dir: Option<String>,
    timezone: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Output directory for the generated site.
    pub out_dir: PathBuf,
    /// Directory holding `groups/`, `events/` and `hackathons/` records.
    pub data_dir: PathBuf,
    /// Template directory. `None` uses the templates bundled with the builder.
    pub templates_dir: Option<PathBuf>,
    /// Static asset directory. `None` uses the assets bundled with the builder.
    pub public_dir: Option<PathBuf>,
    /// Time zone event times are displayed in.
    pub timezone: Tz,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            data_dir: PathBuf::from("data"),
            templates_dir: None,
            public_dir: None,
            timezone: chrono_tz::UTC,
        }
    }
}

/// Event query windows, in days.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EventsConfig {
    /// Days before now included on the home page.
    pub around_past_days: i64,
    /// Days after now included on the home page.
    pub around_future_days: i64,
    /// Days before now included on a group's landing page.
    pub group_past_days: i64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            around_past_days: 14,
            around_future_days: 60,
            group_past_days: 90,
        }
    }
}

impl EventsConfig {
    /// Query windows for the event repository.
    #[must_use]
    pub fn window(&self) -> EventWindow {
        EventWindow {
            around_past: TimeDelta::days(self.around_past_days),
            around_future: TimeDelta::days(self.around_future_days),
            group_past: TimeDelta::days(self.group_past_days),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.out_dir`").
        field: String,
        /// Error message (e.g., "`TECHCITY_OUT` is not set and has no default").
        message: String,
    },
}

/// Require a path field to be non-empty.
fn require_non_empty(path: &Path, field: &str) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a window to be within `0..=MAX_WINDOW_DAYS`.
fn require_window(days: i64, field: &str) -> Result<(), ConfigError> {
    if days < 0 {
        return Err(ConfigError::Validation(format!(
            "{field} cannot be negative"
        )));
    }
    if days > MAX_WINDOW_DAYS {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_WINDOW_DAYS} days"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `techcity.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(out_dir) = &settings.out_dir {
            self.site_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.site_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(templates_dir) = &settings.templates_dir {
            self.site_resolved.templates_dir = Some(templates_dir.clone());
        }
        if let Some(public_dir) = &settings.public_dir {
            self.site_resolved.public_dir = Some(public_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            events: EventsConfig::default(),
            site_resolved: SiteConfig {
                out_dir: base.join("out"),
                data_dir: base.join("data"),
                ..SiteConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.site.expand_env()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.out_dir, "site.out_dir")?;
        require_non_empty(&self.site_resolved.data_dir, "site.data_dir")?;
        require_window(self.events.around_past_days, "events.around_past_days")?;
        require_window(self.events.around_future_days, "events.around_future_days")?;
        require_window(self.events.group_past_days, "events.group_past_days")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory and parse the time zone.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let timezone = match self.site.timezone.as_deref() {
            Some(name) => name.parse::<Tz>().map_err(|_| {
                ConfigError::Validation(format!(
                    "site.timezone '{name}' is not a known IANA time zone"
                ))
            })?,
            None => chrono_tz::UTC,
        };

        self.site_resolved = SiteConfig {
            out_dir: config_dir.join(self.site.out_dir.as_deref().unwrap_or("out")),
            data_dir: config_dir.join(self.site.data_dir.as_deref().unwrap_or("data")),
            templates_dir: self.site.templates_dir.as_deref().map(|d| config_dir.join(d)),
            public_dir: self.site.public_dir.as_deref().map(|d| config_dir.join(d)),
            timezone,
        };

        Ok(())
    }
}
