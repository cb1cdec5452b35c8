//! Application configuration file support.
//!
//! This module provides utilities for reading crate configuration from TOML
//! configuration files. Every field carries a serde default, so a missing
//! file or a partial file yields a working configuration against the public
//! provider endpoints.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sources::{sunrise_sunset_org, sunrisesunset_io};

/// Error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Crate configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Source adapter endpoints and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_sunrise_sunset_org_url")]
    pub sunrise_sunset_org_url: String,
    #[serde(default = "default_sunrisesunset_io_url")]
    pub sunrisesunset_io_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            sunrise_sunset_org_url: default_sunrise_sunset_org_url(),
            sunrisesunset_io_url: default_sunrisesunset_io_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Geocoding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_sunrise_sunset_org_url() -> String {
    sunrise_sunset_org::DEFAULT_BASE_URL.to_string()
}

fn default_sunrisesunset_io_url() -> String {
    sunrisesunset_io::DEFAULT_BASE_URL.to_string()
}

fn default_geocoder_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Searches for `suntrack.toml` in the current directory, then the
    /// parent directory. Falls back to defaults when no file exists.
    pub fn load() -> Self {
        for path in Self::default_locations() {
            if path.is_file() {
                match Self::from_file(&path) {
                    Ok(config) => return config,
                    Err(err) => {
                        log::warn!("ignoring unreadable config {}: {}", path.display(), err);
                    }
                }
            }
        }
        Self::default()
    }

    fn default_locations() -> Vec<PathBuf> {
        vec![
            PathBuf::from("suntrack.toml"),
            PathBuf::from("../suntrack.toml"),
        ]
    }
}
