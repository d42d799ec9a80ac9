//! User configuration for the `paye` command.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line flags. Every key in the file is optional.
//!
//! ```toml
//! period = "annual"       # or "monthly"
//! status = "freelance"    # or "salary"
//! format = "json"         # or "text"
//! breakdown = true
//! log_level = "debug"     # any tracing EnvFilter directive
//! log_file = "paye.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_core::{FilerStatus, PayPeriod};
use thiserror::Error;

/// How calculation results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Period entered amounts cover when `--period` is not given.
    pub period: PayPeriod,
    /// Filer status when `--status` is not given.
    pub status: FilerStatus,
    pub format: OutputFormat,
    /// Print the per-band breakdown with text output.
    pub breakdown: bool,
    pub log_level: String,
    /// Append log records to this file as well as stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            period: PayPeriod::Monthly,
            status: FilerStatus::Salary,
            format: OutputFormat::Text,
            breakdown: false,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Settings given on the command line for one calculation. `None` leaves the
/// configured value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalcOverrides {
    pub period: Option<PayPeriod>,
    pub status: Option<FilerStatus>,
    pub format: Option<OutputFormat>,
    pub breakdown: Option<bool>,
}

impl AppConfig {
    /// Applies command-line settings on top of this configuration.
    pub fn with_overrides(
        self,
        overrides: CalcOverrides,
    ) -> Self {
        Self {
            period: overrides.period.unwrap_or(self.period),
            status: overrides.status.unwrap_or(self.status),
            format: overrides.format.unwrap_or(self.format),
            breakdown: overrides.breakdown.unwrap_or(self.breakdown),
            ..self
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
