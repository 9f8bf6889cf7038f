//! Application configuration.
//!
//! This module provides a centralized configuration structure populated
//! from defaults overlaid with `STATION_*` environment variables (a
//! `.env` file is read by the binary before construction). Defaults
//! describe the production deployment.

use serde::{Deserialize, Serialize};
use std::env;

use crate::core::error::{Error, Result};

/// Identity of the deployed site, used for titles, canonical URLs and
/// structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub origin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Development Station".to_string(),
            origin: "https://developmentstation.app".to_string(),
        }
    }
}

/// Legacy tool-page loader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Path segment under the origin where legacy tool documents live.
    pub tools_path: String,

    /// Suffix of the shared runtime script that is already part of the
    /// shell and must never be re-executed from a tool page.
    pub shared_script: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tools_path: "tools".to_string(),
            shared_script: "modern-shared.js".to_string(),
        }
    }
}

/// Offline cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Version stamp baked into partition names; bumping it retires all
    /// previous partitions on activation.
    pub version: String,

    /// Resources fetched and cached during installation.
    pub precache: Vec<String>,

    /// Foreign hosts whose resources may be cached.
    pub allowed_hosts: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: "2.0.0".to_string(),
            precache: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/404.html".to_string(),
                "/assets/css/modern-design-system.css".to_string(),
                "/assets/js/modern-shared.js".to_string(),
                "/manifest.json".to_string(),
            ],
            allowed_hosts: vec![
                "fonts.googleapis.com".to_string(),
                "fonts.gstatic.com".to_string(),
            ],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "station_spa=info".to_string(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,

    /// Legacy tool-page loader settings.
    pub loader: LoaderConfig,

    /// Offline cache settings.
    pub cache: CacheConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Build from defaults overlaid with `STATION_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = read_env("STATION_SITE_NAME")? {
            config.site.name = name;
        }
        if let Some(origin) = read_env("STATION_SITE_ORIGIN")? {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(Error::config(format!(
                    "STATION_SITE_ORIGIN must be an absolute origin, got '{origin}'"
                )));
            }
            config.site.origin = origin.trim_end_matches('/').to_string();
        }
        if let Some(path) = read_env("STATION_TOOLS_PATH")? {
            config.loader.tools_path = path.trim_matches('/').to_string();
        }
        if let Some(version) = read_env("STATION_CACHE_VERSION")? {
            if version.is_empty() {
                return Err(Error::config("STATION_CACHE_VERSION must not be empty"));
            }
            config.cache.version = version;
        }
        if let Some(filter) = read_env("STATION_LOG_FILTER")? {
            config.logging.filter = filter;
        }

        Ok(config)
    }
}

fn read_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(Error::config(format!("{key} is not valid unicode")))
        }
    }
}
