//! Configuration file support for stride.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/stride/config.toml`.

use crate::{DateUnit, Error, ProgressionOptions, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Defaults applied when a command line omits step or bound style
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default = "default_step")]
    pub step: i64,

    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            inclusive: default_inclusive(),
        }
    }
}

/// Output formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Maximum number of elements printed; unlimited when absent
    #[serde(default)]
    pub limit: Option<usize>,

    /// strftime pattern for dates; each unit has its own default
    #[serde(default)]
    pub date_format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            limit: None,
            date_format: None,
        }
    }
}

// Default value functions
fn default_step() -> i64 {
    1
}

fn default_inclusive() -> bool {
    true
}

fn default_separator() -> String {
    "\n".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values no progression can be built from
    pub fn validate(&self) -> Result<()> {
        if self.defaults.step == 0 || self.defaults.step == i64::MIN {
            return Err(Error::Config(format!(
                "defaults.step must be non-zero and greater than {}",
                i64::MIN
            )));
        }
        if self.output.limit == Some(0) {
            return Err(Error::Config("output.limit must be positive".into()));
        }
        if let Some(pattern) = &self.output.date_format {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(Error::Config(format!(
                    "output.date_format {:?} is not a valid strftime pattern",
                    pattern
                )));
            }
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("stride").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Default step and inclusivity as progression options
    pub fn options(&self) -> ProgressionOptions<i64> {
        ProgressionOptions {
            step: self.defaults.step,
            inclusive: self.defaults.inclusive,
        }
    }

    /// strftime pattern for printing instants of `unit`
    pub fn date_format(&self, unit: DateUnit) -> &str {
        self.output
            .date_format
            .as_deref()
            .unwrap_or_else(|| unit.default_format())
    }
}
