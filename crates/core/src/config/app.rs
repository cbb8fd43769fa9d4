// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application configuration file (`wh.toml`)
//!
//! Every section is optional; missing keys take their defaults. Durations use
//! humantime syntax (`"30s"`, `"2m"`).

use crate::alerts::AlertThresholds;
use crate::lock::LockConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "WH_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "wh.toml";
const DEFAULT_DATABASE: &str = "wh.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML syntax error in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Shared SQLite database file
    pub database: PathBuf,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
    pub lock: LockConfig,
    pub alerts: AlertsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_file: None,
            lock: LockConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertsConfig {
    pub critical_days: i64,
    pub warning_days: i64,
    pub info_days: i64,
    /// Default look-ahead for alert lists
    pub horizon_days: i64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        let thresholds = AlertThresholds::default();
        Self {
            critical_days: thresholds.critical_days,
            warning_days: thresholds.warning_days,
            info_days: thresholds.info_days,
            horizon_days: 90,
        }
    }
}

impl AlertsConfig {
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds::new(self.critical_days, self.warning_days, self.info_days)
    }
}

impl AppConfig {
    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; a relative `database`/`log_file` is taken relative to the file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.database = anchor(dir, &config.database);
            config.log_file = config.log_file.map(|p| anchor(dir, &p));
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from the first of: `explicit`, `$WH_CONFIG`, `./wh.toml`, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match config_path(explicit, env, Path::new(".")) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lock.check().map_err(ConfigError::Invalid)?;
        self.alerts.thresholds().check().map_err(ConfigError::Invalid)?;
        if self.alerts.horizon_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "alerts.horizon_days must not be negative (got {})",
                self.alerts.horizon_days
            )));
        }
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database path is empty".to_string()));
        }
        Ok(())
    }
}

/// Which config file to read, if any.
///
/// An explicit path or `$WH_CONFIG` is returned even if missing so the caller
/// reports it; the working-directory default is only used when present.
pub fn config_path(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

fn anchor(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || dir.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
