//! Daemon configuration loaded from `~/.catalog-daemon/config.toml`.
//!
//! The file is optional; missing sections and fields fall back to their
//! defaults. Command-line values override whatever the file sets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::batch::{BatchConfig, DEFAULT_MAX_PENDING};

/// Catalog size seeded at startup when nothing else is configured.
pub const DEFAULT_SEED_SIZE: usize = 1_000_000;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid duration '{value}' for {field}: {source}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        source: humantime::DurationError,
    },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// `[catalog]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Number of items created at startup (ids `1..=seed_size`).
    #[serde(default = "default_seed_size")]
    pub seed_size: usize,
}

fn default_seed_size() -> usize {
    DEFAULT_SEED_SIZE
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            seed_size: DEFAULT_SEED_SIZE,
        }
    }
}

/// `[batch]` table. Durations use humantime syntax (`"10s"`, `"250ms"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<String>,
    /// Bound on distinct pending keys per class; `0` disables the bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pending: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaemonConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub batch: BatchSection,
}

/// Values supplied on the command line; each one wins over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub seed_size: Option<usize>,
    pub add_interval: Option<Duration>,
    pub get_interval: Option<Duration>,
    pub update_interval: Option<Duration>,
    pub max_pending: Option<usize>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed_size: usize,
    pub batch: BatchConfig,
}

fn parse_interval(
    field: &'static str,
    value: Option<&str>,
    fallback: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        Some(raw) => humantime::parse_duration(raw).map_err(|source| ConfigError::InvalidDuration {
            field,
            value: raw.to_string(),
            source,
        }),
        None => Ok(fallback),
    }
}

fn bound(max_pending: usize) -> Option<usize> {
    (max_pending > 0).then_some(max_pending)
}

impl DaemonConfig {
    /// Merge file values, command-line overrides and defaults.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<Settings, ConfigError> {
        let defaults = BatchConfig::default();
        let file = &self.batch;

        let add_interval = match overrides.add_interval {
            Some(d) => d,
            None => parse_interval("batch.add_interval", file.add_interval.as_deref(), defaults.add_interval)?,
        };
        let get_interval = match overrides.get_interval {
            Some(d) => d,
            None => parse_interval("batch.get_interval", file.get_interval.as_deref(), defaults.get_interval)?,
        };
        let update_interval = match overrides.update_interval {
            Some(d) => d,
            None => parse_interval(
                "batch.update_interval",
                file.update_interval.as_deref(),
                defaults.update_interval,
            )?,
        };
        let max_pending = overrides
            .max_pending
            .or(file.max_pending)
            .map_or(Some(DEFAULT_MAX_PENDING), bound);

        Ok(Settings {
            seed_size: overrides.seed_size.unwrap_or(self.catalog.seed_size),
            batch: BatchConfig {
                add_interval,
                get_interval,
                update_interval,
                max_pending,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Default location of the config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".catalog-daemon").join("config.toml"))
}

/// Parse config TOML text.
pub fn parse_config(content: &str) -> Result<DaemonConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load the daemon configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// and an absent file yields `DaemonConfig::default()`.
pub fn load_config(path: Option<&Path>) -> Result<DaemonConfig, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                debug!("No daemon config file found; using defaults");
                return Ok(DaemonConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    debug!("Loaded daemon config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "daemon_config_tests.rs"]
mod daemon_config_tests;
